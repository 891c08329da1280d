//! Chat session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::chat::DEFAULT_SESSION_TTL_DAYS;

const MAX_SESSION_TTL_DAYS: i64 = 365;

/// Chat session lifetime and cleanup settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Days a session stays readable after creation
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,

    /// Seconds between expired-session sweeps
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

impl ChatConfig {
    /// Get sweep interval as Duration
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&self.session_ttl_days) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.purge_interval_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            session_ttl_days: default_session_ttl_days(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

fn default_session_ttl_days() -> i64 {
    DEFAULT_SESSION_TTL_DAYS
}

fn default_purge_interval() -> u64 {
    3600
}
