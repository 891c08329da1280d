//! GetCurrentUserHandler - Query handler for the authenticated account.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{AccountError, User};
use crate::ports::UserRepository;

/// Query for the caller's own account.
#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub user_id: UserId,
}

/// Handler for loading the caller's account.
///
/// A valid token whose user was deleted yields `NotFound`.
pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<User, AccountError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or(AccountError::NotFound)
    }
}
