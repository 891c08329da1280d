//! Payment repository port.
//!
//! # Settlement
//!
//! `mark_paid` and `mark_failed` are compare-and-set operations: they only
//! move a payment whose current status allows it, and report whether this
//! call performed the move. Two captures racing on the same order therefore
//! see exactly one `true`.
//!
//! A `failed` payment is still open: Razorpay reports failures per attempt
//! and the order can be paid on a later one.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::payment::Payment;

/// Repository port for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment record.
    ///
    /// # Errors
    ///
    /// - `DuplicateOrder` if a record for the same gateway order exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Find the payment record for a gateway order.
    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, DomainError>;

    /// Move a `created` or `failed` payment to `paid`.
    ///
    /// Returns `false` if the payment is already `paid` (or does not exist).
    async fn mark_paid(
        &self,
        order_id: &str,
        gateway_payment_id: &str,
        method: Option<&str>,
        paid_at: Timestamp,
    ) -> Result<bool, DomainError>;

    /// Move a `created` payment to `failed`.
    ///
    /// Returns `false` if the payment was not in `created` (or does not exist).
    async fn mark_failed(
        &self,
        order_id: &str,
        gateway_payment_id: Option<&str>,
    ) -> Result<bool, DomainError>;
}
