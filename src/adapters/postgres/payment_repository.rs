//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentStatus, Plan};
use crate::ports::PaymentRepository;

use super::{parse_column, violated_constraint};

/// PostgreSQL implementation of the PaymentRepository port.
///
/// Settlement updates are guarded by the current status so concurrent
/// webhook deliveries cannot both win.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    amount_minor: i64,
    currency: String,
    order_id: String,
    gateway_payment_id: Option<String>,
    method: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let plan = parse_column::<Plan>("plan", &row.plan)?;
        let status = parse_column::<PaymentStatus>("status", &row.status)?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan,
            amount_minor: row.amount_minor,
            currency: row.currency,
            order_id: row.order_id,
            gateway_payment_id: row.gateway_payment_id,
            method: row.method,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
            paid_at: row.paid_at.map(Timestamp::from_datetime),
        })
    }
}

fn conflict_for(constraint: &str) -> Option<DomainError> {
    (constraint == "payments_order_id_key").then(|| {
        DomainError::new(
            ErrorCode::DuplicateOrder,
            "Payment already recorded for this order",
        )
    })
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, plan, amount_minor, currency, order_id,
                gateway_payment_id, method, status, created_at, paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_uuid())
        .bind(payment.plan.id())
        .bind(payment.amount_minor)
        .bind(&payment.currency)
        .bind(&payment.order_id)
        .bind(&payment.gateway_payment_id)
        .bind(&payment.method)
        .bind(payment.status.as_str())
        .bind(payment.created_at.as_datetime())
        .bind(payment.paid_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violated_constraint(&e)
                .and_then(conflict_for)
                .unwrap_or_else(|| DomainError::database(format!("Failed to save payment: {}", e)))
        })?;

        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, plan, amount_minor, currency, order_id,
                   gateway_payment_id, method, status, created_at, paid_at
            FROM payments
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch payment: {}", e)))?;

        row.map(Payment::try_from).transpose()
    }

    async fn mark_paid(
        &self,
        order_id: &str,
        gateway_payment_id: &str,
        method: Option<&str>,
        paid_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = 'paid',
                gateway_payment_id = $2,
                method = $3,
                paid_at = $4
            WHERE order_id = $1 AND status IN ('created', 'failed')
            "#,
        )
        .bind(order_id)
        .bind(gateway_payment_id)
        .bind(method)
        .bind(paid_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to mark payment paid: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn mark_failed(
        &self,
        order_id: &str,
        gateway_payment_id: Option<&str>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                status = 'failed',
                gateway_payment_id = COALESCE($2, gateway_payment_id)
            WHERE order_id = $1 AND status = 'created'
            "#,
        )
        .bind(order_id)
        .bind(gateway_payment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to mark payment failed: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> PaymentRow {
        PaymentRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: "plan6".to_string(),
            amount_minor: 99_900,
            currency: "INR".to_string(),
            order_id: "order_abc".to_string(),
            gateway_payment_id: None,
            method: None,
            status: status.to_string(),
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    #[test]
    fn created_row_converts() {
        let payment = Payment::try_from(row("created")).unwrap();
        assert_eq!(payment.plan, Plan::HalfYear);
        assert_eq!(payment.status, PaymentStatus::Created);
        assert_eq!(payment.order_id, "order_abc");
        assert!(payment.paid_at.is_none());
    }

    #[test]
    fn paid_row_keeps_settlement_details() {
        let paid_at = Utc::now();
        let payment = Payment::try_from(PaymentRow {
            gateway_payment_id: Some("pay_1".to_string()),
            method: Some("upi".to_string()),
            paid_at: Some(paid_at),
            ..row("paid")
        })
        .unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.gateway_payment_id.as_deref(), Some("pay_1"));
        assert_eq!(payment.method.as_deref(), Some("upi"));
        assert_eq!(payment.paid_at, Some(Timestamp::from_datetime(paid_at)));
    }

    #[test]
    fn bad_plan_or_status_is_database_error() {
        let err = Payment::try_from(row("refunded")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err = Payment::try_from(PaymentRow {
            plan: "plan1".to_string(),
            ..row("created")
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn order_id_violation_is_duplicate_order() {
        let err = conflict_for("payments_order_id_key").unwrap();
        assert_eq!(err.code, ErrorCode::DuplicateOrder);
        assert!(err.is_conflict());
        assert!(conflict_for("payments_pkey").is_none());
    }
}
