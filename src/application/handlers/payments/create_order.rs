//! CreateOrderHandler - Command handler for starting a plan checkout.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentError, Plan};
use crate::ports::{GatewayOrder, OrderRequest, PaymentGateway, PaymentRepository};

/// Command to open a gateway order for a plan.
///
/// The plan is named either by `plan_id` or by `amount`. `amount` wins when
/// both are present.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderCommand {
    pub user_id: UserId,
    pub plan_id: Option<String>,
    /// Plan price in rupees, or the same price in paise.
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub receipt: Option<String>,
}

/// Result of opening an order.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    /// Gateway order, handed to the checkout widget.
    pub order: GatewayOrder,
    /// Local payment record in status `created`.
    pub payment: Payment,
}

/// Handler for opening a gateway order.
pub struct CreateOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
    payments: Arc<dyn PaymentRepository>,
    currency: String,
}

impl CreateOrderHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        payments: Arc<dyn PaymentRepository>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            payments,
            currency: currency.into(),
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, PaymentError> {
        let plan = resolve_plan(cmd.amount, cmd.plan_id.as_deref())
            .ok_or_else(|| PaymentError::validation("amount", "Invalid amount or planId"))?;

        if let Some(currency) = cmd.currency.as_deref() {
            if !currency.eq_ignore_ascii_case(&self.currency) {
                return Err(PaymentError::validation(
                    "currency",
                    format!("Unsupported currency: {}", currency),
                ));
            }
        }

        let now = Timestamp::now();
        let receipt = cmd
            .receipt
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("rcpt_{}", now.as_unix_millis()));

        let order = self
            .gateway
            .create_order(OrderRequest {
                amount_minor: plan.price_minor(),
                currency: self.currency.clone(),
                receipt,
            })
            .await
            .map_err(|e| {
                error!(user_id = %cmd.user_id, error = %e, "Gateway order creation failed");
                PaymentError::gateway(e.message)
            })?;

        if order.amount != plan.price_minor() {
            warn!(order_id = %order.id, expected = plan.price_minor(), actual = order.amount, "Gateway echoed a different amount");
        }

        let payment = Payment::create(cmd.user_id, plan, self.currency.clone(), order.id.clone(), now);
        self.payments.save(&payment).await?;

        info!(
            order_id = %order.id,
            user_id = %cmd.user_id,
            plan = %plan.id(),
            "Payment order created"
        );

        Ok(CreateOrderResult { order, payment })
    }
}

/// Picks the plan from an explicit amount, else from a plan id.
fn resolve_plan(amount: Option<f64>, plan_id: Option<&str>) -> Option<Plan> {
    if let Some(amount) = amount.filter(|a| *a > 0.0) {
        if amount.fract() != 0.0 {
            return None;
        }
        let whole = amount as i64;
        return Plan::from_price_major(whole).or_else(|| Plan::from_price_minor(whole));
    }
    plan_id.map(str::trim).and_then(Plan::from_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::adapters::razorpay::MockPaymentGateway;
    use crate::domain::payment::PaymentStatus;
    use crate::ports::{GatewayError, GatewayErrorCode};

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(
        gateway: Arc<MockPaymentGateway>,
        payments: Arc<InMemoryPaymentRepository>,
    ) -> CreateOrderHandler {
        CreateOrderHandler::new(gateway, payments, "INR")
    }

    fn by_plan(plan_id: &str) -> CreateOrderCommand {
        CreateOrderCommand {
            user_id: UserId::new(),
            plan_id: Some(plan_id.to_string()),
            ..Default::default()
        }
    }

    fn by_amount(amount: f64) -> CreateOrderCommand {
        CreateOrderCommand {
            user_id: UserId::new(),
            amount: Some(amount),
            ..Default::default()
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn resolve_plan_accepts_rupees_paise_and_ids() {
        let ten_rupees = Plan::Year.price_major() as f64;
        assert_eq!(resolve_plan(Some(ten_rupees), None), Some(Plan::Year));
        assert_eq!(
            resolve_plan(Some(Plan::Year.price_minor() as f64), None),
            Some(Plan::Year)
        );
        assert_eq!(resolve_plan(None, Some("plan6")), Some(Plan::HalfYear));
        assert_eq!(resolve_plan(Some(7.0), Some("plan6")), None);
        assert_eq!(resolve_plan(Some(5.5), None), None);
        assert_eq!(resolve_plan(Some(0.0), Some("plan15")), Some(Plan::FifteenMonths));
        assert_eq!(resolve_plan(None, Some("gold")), None);
    }

    #[tokio::test]
    async fn creates_gateway_order_and_payment_record() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());

        let result = handler(gateway.clone(), payments.clone())
            .handle(by_plan("plan12"))
            .await
            .unwrap();

        assert_eq!(result.order.id, "order_mock_1");
        assert_eq!(result.payment.status, PaymentStatus::Created);
        assert_eq!(result.payment.amount_minor, Plan::Year.price_minor());

        let sent = gateway.requests();
        assert_eq!(sent[0].amount_minor, Plan::Year.price_minor());
        assert_eq!(sent[0].currency, "INR");
        assert!(sent[0].receipt.starts_with("rcpt_"));
        assert_eq!(payments.all().await.len(), 1);
    }

    #[tokio::test]
    async fn client_receipt_is_forwarded() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let mut cmd = by_amount(Plan::HalfYear.price_major() as f64);
        cmd.receipt = Some("rcpt_custom".to_string());

        handler(gateway.clone(), Arc::new(InMemoryPaymentRepository::new()))
            .handle(cmd)
            .await
            .unwrap();

        assert_eq!(gateway.requests()[0].receipt, "rcpt_custom");
    }

    #[tokio::test]
    async fn unknown_amount_is_rejected_before_gateway() {
        let gateway = Arc::new(MockPaymentGateway::new());

        let err = handler(gateway.clone(), Arc::new(InMemoryPaymentRepository::new()))
            .handle(by_amount(42.0))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Invalid amount or planId");
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn foreign_currency_is_rejected() {
        let mut cmd = by_plan("plan6");
        cmd.currency = Some("USD".to_string());

        let err = handler(
            Arc::new(MockPaymentGateway::new()),
            Arc::new(InMemoryPaymentRepository::new()),
        )
        .handle(cmd)
        .await
        .unwrap_err();

        assert!(matches!(err, PaymentError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn gateway_failure_records_nothing() {
        let gateway = Arc::new(MockPaymentGateway::new());
        gateway.set_error(GatewayError::new(GatewayErrorCode::ProviderError, "down"));
        let payments = Arc::new(InMemoryPaymentRepository::new());

        let err = handler(gateway, payments.clone())
            .handle(by_plan("plan6"))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Gateway(_)));
        assert!(payments.all().await.is_empty());
    }
}
