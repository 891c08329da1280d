//! In-memory subscription repository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::payment::Subscription;
use crate::ports::SubscriptionRepository;

/// In-memory storage for subscriptions
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<Vec<Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored subscriptions
    pub async fn count(&self) -> usize {
        self.subscriptions.read().await.len()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions
            .iter()
            .any(|s| s.order_id == subscription.order_id)
        {
            return Err(DomainError::new(
                ErrorCode::SubscriptionExists,
                "Subscription already exists for this order",
            ));
        }
        subscriptions.push(subscription.clone());
        Ok(())
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.iter().find(|s| s.order_id == order_id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        let mut mine: Vec<_> = subscriptions
            .iter()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(mine)
    }
}
