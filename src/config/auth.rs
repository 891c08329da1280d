//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest JWT secret accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 session cookies)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,

    /// Session token lifetime in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_days.max(0) as u64 * 24 * 60 * 60)
    }

    /// Validate authentication configuration
    ///
    /// Any non-empty secret is accepted in development; production requires
    /// at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN
        {
            return Err(ValidationError::WeakJwtSecret);
        }
        if !(1..=30).contains(&self.token_ttl_days) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.cookie_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_COOKIE_NAME"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: default_token_ttl_days(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_token_ttl_days() -> i64 {
    7
}

fn default_cookie_name() -> String {
    "token".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl_days, 7);
        assert_eq!(config.cookie_name, "token");
    }

    #[test]
    fn test_token_ttl_duration() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_validation_production_requires_long_secret() {
        let config = AuthConfig {
            jwt_secret: "short-secret".to_string(),
            ..Default::default()
        };
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret)
        ));
    }

    #[test]
    fn test_validation_ttl_bounds() {
        let config = AuthConfig {
            jwt_secret: "dev-secret".to_string(),
            token_ttl_days: 0,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            jwt_secret: "a".repeat(48),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
