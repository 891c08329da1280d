//! PostgreSQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::payment::{Plan, Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

use super::{parse_column, violated_constraint};

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Uuid,
    order_id: String,
    plan: String,
    amount_minor: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let plan = parse_column::<Plan>("plan", &row.plan)?;
        let status = parse_column::<SubscriptionStatus>("status", &row.status)?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            order_id: row.order_id,
            plan,
            amount_minor: row.amount_minor,
            start_date: Timestamp::from_datetime(row.start_date),
            end_date: Timestamp::from_datetime(row.end_date),
            status,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn conflict_for(constraint: &str) -> Option<DomainError> {
    (constraint == "subscriptions_order_id_key").then(|| {
        DomainError::new(
            ErrorCode::SubscriptionExists,
            "Subscription already exists for this order",
        )
    })
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, order_id, plan, amount_minor,
                start_date, end_date, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.user_id.as_uuid())
        .bind(&subscription.order_id)
        .bind(subscription.plan.id())
        .bind(subscription.amount_minor)
        .bind(subscription.start_date.as_datetime())
        .bind(subscription.end_date.as_datetime())
        .bind(subscription.status.as_str())
        .bind(subscription.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violated_constraint(&e).and_then(conflict_for).unwrap_or_else(|| {
                DomainError::database(format!("Failed to save subscription: {}", e))
            })
        })?;

        Ok(())
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, order_id, plan, amount_minor,
                   start_date, end_date, status, created_at
            FROM subscriptions
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch subscription: {}", e)))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, order_id, plan, amount_minor,
                   start_date, end_date, status, created_at
            FROM subscriptions
            WHERE user_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list subscriptions: {}", e)))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
