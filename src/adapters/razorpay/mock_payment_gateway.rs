//! Mock payment gateway for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{GatewayError, GatewayOrder, OrderRequest, PaymentGateway};

/// Mock gateway that hands out sequential order ids.
///
/// Records every request so tests can assert on amounts and receipts.
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_seq: u32,
    requests: Vec<OrderRequest>,
    next_error: Option<GatewayError>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call with `error`.
    pub fn set_error(&self, error: GatewayError) {
        if let Ok(mut state) = self.inner.lock() {
            state.next_error = Some(error);
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.inner
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| GatewayError::network("mock gateway poisoned"))?;

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state.next_seq += 1;
        let order = GatewayOrder {
            id: format!("order_mock_{}", state.next_seq),
            amount: request.amount_minor,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: "created".to_string(),
            created_at: None,
        };
        state.requests.push(request);
        Ok(order)
    }
}
