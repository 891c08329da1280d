//! Subscription repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::payment::Subscription;

/// Repository port for subscription records.
///
/// At most one subscription exists per gateway order.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionExists` if the order already has a subscription
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Find the subscription paid for by a gateway order.
    async fn find_by_order_id(&self, order_id: &str)
        -> Result<Option<Subscription>, DomainError>;

    /// All subscriptions of a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError>;
}
