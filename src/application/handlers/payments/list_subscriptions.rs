//! ListSubscriptionsHandler - Query handler for a user's subscription history.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::payment::{PaymentError, Subscription};
use crate::ports::SubscriptionRepository;

/// Query for the caller's subscriptions.
#[derive(Debug, Clone)]
pub struct ListSubscriptionsQuery {
    pub user_id: UserId,
}

/// Handler listing subscriptions, newest first.
pub struct ListSubscriptionsHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl ListSubscriptionsHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(
        &self,
        query: ListSubscriptionsQuery,
    ) -> Result<Vec<Subscription>, PaymentError> {
        Ok(self.subscriptions.list_for_user(&query.user_id).await?)
    }
}
