//! In-memory payment repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::PaymentRepository;

/// In-memory storage for payments, keyed by gateway order id
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored payment
    pub async fn all(&self) -> Vec<Payment> {
        self.payments.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.order_id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateOrder,
                "Payment already recorded for this order",
            ));
        }
        payments.insert(payment.order_id.clone(), payment.clone());
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(order_id).cloned())
    }

    async fn mark_paid(
        &self,
        order_id: &str,
        gateway_payment_id: &str,
        method: Option<&str>,
        paid_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut payments = self.payments.write().await;
        match payments.get_mut(order_id) {
            Some(payment) if payment.status.is_open() => {
                payment
                    .mark_paid(gateway_payment_id, method.map(str::to_string), paid_at)
                    .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_failed(
        &self,
        order_id: &str,
        gateway_payment_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        let mut payments = self.payments.write().await;
        match payments.get_mut(order_id) {
            Some(payment) if payment.status == PaymentStatus::Created => {
                payment
                    .mark_failed(gateway_payment_id.map(str::to_string))
                    .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::payment::Plan;

    fn payment(order_id: &str) -> Payment {
        Payment::create(UserId::new(), Plan::Year, "INR", order_id, Timestamp::now())
    }

    #[tokio::test]
    async fn save_rejects_duplicate_order() {
        let repo = InMemoryPaymentRepository::new();
        repo.save(&payment("order_1")).await.unwrap();

        let err = repo.save(&payment("order_1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateOrder);
    }

    #[tokio::test]
    async fn mark_paid_only_transitions_once() {
        let repo = InMemoryPaymentRepository::new();
        repo.save(&payment("order_1")).await.unwrap();

        let now = Timestamp::now();
        assert!(repo.mark_paid("order_1", "pay_1", Some("upi"), now).await.unwrap());
        assert!(!repo.mark_paid("order_1", "pay_2", None, now).await.unwrap());

        let stored = repo.find_by_order_id("order_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
        assert_eq!(stored.gateway_payment_id.as_deref(), Some("pay_1"));
        assert_eq!(stored.method.as_deref(), Some("upi"));
    }

    #[tokio::test]
    async fn mark_failed_does_not_override_paid() {
        let repo = InMemoryPaymentRepository::new();
        repo.save(&payment("order_1")).await.unwrap();
        repo.mark_paid("order_1", "pay_1", None, Timestamp::now())
            .await
            .unwrap();

        assert!(!repo.mark_failed("order_1", Some("pay_1")).await.unwrap());
        let stored = repo.find_by_order_id("order_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn mark_paid_settles_failed_attempt() {
        let repo = InMemoryPaymentRepository::new();
        repo.save(&payment("order_1")).await.unwrap();
        assert!(repo.mark_failed("order_1", Some("pay_1")).await.unwrap());
        assert!(!repo.mark_failed("order_1", Some("pay_2")).await.unwrap());

        assert!(repo.mark_paid("order_1", "pay_3", Some("card"), Timestamp::now()).await.unwrap());
        let stored = repo.find_by_order_id("order_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
        assert_eq!(stored.gateway_payment_id.as_deref(), Some("pay_3"));
    }

    #[tokio::test]
    async fn unknown_order_is_not_transitioned() {
        let repo = InMemoryPaymentRepository::new();
        assert!(!repo.mark_paid("missing", "pay", None, Timestamp::now()).await.unwrap());
    }
}
