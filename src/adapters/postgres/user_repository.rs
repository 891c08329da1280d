//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::payment::Plan;
use crate::domain::user::{PremiumStatus, User};
use crate::ports::UserRepository;

use super::{parse_column, violated_constraint};

/// PostgreSQL implementation of the UserRepository port.
///
/// Email and username uniqueness is enforced by the `users_email_key` and
/// `users_username_key` constraints.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    username: String,
    password_hash: String,
    is_premium: bool,
    premium_plan: Option<String>,
    premium_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let plan = row
            .premium_plan
            .as_deref()
            .map(|p| parse_column::<Plan>("premium_plan", p))
            .transpose()?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            premium: PremiumStatus {
                is_premium: row.is_premium,
                plan,
                expires_at: row.premium_expires_at.map(Timestamp::from_datetime),
            },
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

macro_rules! select_user {
    ($filter:literal) => {
        concat!(
            "SELECT id, name, email, username, password_hash, ",
            "is_premium, premium_plan, premium_expires_at, created_at ",
            "FROM users WHERE ",
            $filter
        )
    };
}

/// Maps a unique violation on `users` to the matching account conflict.
fn conflict_for(constraint: &str) -> Option<DomainError> {
    match constraint {
        "users_email_key" => Some(DomainError::new(
            ErrorCode::EmailTaken,
            "Email already registered",
        )),
        "users_username_key" => Some(DomainError::new(
            ErrorCode::UsernameTaken,
            "Username already taken",
        )),
        _ => None,
    }
}

fn fetch_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to fetch user: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, username, password_hash,
                is_premium, premium_plan, premium_expires_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.premium.is_premium)
        .bind(user.premium.plan.map(|p| p.id()))
        .bind(user.premium.expires_at.map(|t| *t.as_datetime()))
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violated_constraint(&e)
                .and_then(conflict_for)
                .unwrap_or_else(|| DomainError::database(format!("Failed to create user: {}", e)))
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(select_user!("id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(select_user!("username = $1"))
            .bind(username.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(select_user!("email = $1"))
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(User::try_from).transpose()
    }

    async fn update_premium(
        &self,
        id: &UserId,
        premium: &PremiumStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                is_premium = $2,
                premium_plan = $3,
                premium_expires_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(premium.is_premium)
        .bind(premium.plan.map(|p| p.id()))
        .bind(premium.expires_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update premium status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }

        Ok(())
    }
}
