//! Payment record and its settlement state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{PaymentId, Timestamp, UserId};

use super::{PaymentError, Plan};

/// Settlement state of a payment.
///
/// ```text
/// created ──► paid
///    │         ▲
///    └──► failed
/// ```
///
/// `failed` records the latest attempt only; the customer may still pay the
/// same order with another method, so a capture settles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Returns true if the state machine allows moving to `target`.
    pub fn can_transition_to(&self, target: PaymentStatus) -> bool {
        matches!(
            (self, target),
            (PaymentStatus::Created, PaymentStatus::Paid)
                | (PaymentStatus::Created, PaymentStatus::Failed)
                | (PaymentStatus::Failed, PaymentStatus::Paid)
        )
    }

    /// True while a capture can still settle the order.
    pub fn is_open(&self) -> bool {
        self.can_transition_to(PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(PaymentStatus::Created),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// A gateway order placed by a user for one plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub plan: Plan,
    /// Amount in paise.
    pub amount_minor: i64,
    pub currency: String,
    /// Order id assigned by the gateway.
    pub order_id: String,
    /// Payment id assigned by the gateway once the customer pays.
    pub gateway_payment_id: Option<String>,
    pub method: Option<String>,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

impl Payment {
    /// Records a freshly created gateway order.
    pub fn create(
        user_id: UserId,
        plan: Plan,
        currency: impl Into<String>,
        order_id: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            plan,
            amount_minor: plan.price_minor(),
            currency: currency.into(),
            order_id: order_id.into(),
            gateway_payment_id: None,
            method: None,
            status: PaymentStatus::Created,
            created_at: now,
            paid_at: None,
        }
    }

    /// Amount in whole rupees.
    pub fn amount_major(&self) -> i64 {
        self.amount_minor / 100
    }

    /// Settles the payment.
    pub fn mark_paid(
        &mut self,
        gateway_payment_id: impl Into<String>,
        method: Option<String>,
        now: Timestamp,
    ) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Paid)?;
        self.gateway_payment_id = Some(gateway_payment_id.into());
        self.method = method;
        self.paid_at = Some(now);
        Ok(())
    }

    /// Marks the payment as failed.
    pub fn mark_failed(&mut self, gateway_payment_id: Option<String>) -> Result<(), PaymentError> {
        self.transition(PaymentStatus::Failed)?;
        if gateway_payment_id.is_some() {
            self.gateway_payment_id = gateway_payment_id;
        }
        Ok(())
    }

    fn transition(&mut self, target: PaymentStatus) -> Result<(), PaymentError> {
        if !self.status.can_transition_to(target) {
            return Err(PaymentError::invalid_transition(self.status, target));
        }
        self.status = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        Payment::create(UserId::new(), Plan::Year, "INR", "order_123", Timestamp::now())
    }

    #[test]
    fn create_uses_plan_price() {
        let p = payment();
        assert_eq!(p.amount_minor, 1000);
        assert_eq!(p.amount_major(), 10);
        assert_eq!(p.status, PaymentStatus::Created);
        assert!(p.paid_at.is_none());
    }

    #[test]
    fn mark_paid_records_gateway_details() {
        let mut p = payment();
        let now = Timestamp::now();
        p.mark_paid("pay_1", Some("upi".to_string()), now).unwrap();

        assert_eq!(p.status, PaymentStatus::Paid);
        assert_eq!(p.gateway_payment_id.as_deref(), Some("pay_1"));
        assert_eq!(p.method.as_deref(), Some("upi"));
        assert_eq!(p.paid_at, Some(now));
    }

    #[test]
    fn payment_settles_only_once() {
        let mut p = payment();
        p.mark_paid("pay_1", None, Timestamp::now()).unwrap();

        assert!(p.mark_paid("pay_2", None, Timestamp::now()).is_err());
        assert!(p.mark_failed(None).is_err());
        assert_eq!(p.gateway_payment_id.as_deref(), Some("pay_1"));
    }

    #[test]
    fn failed_attempt_can_be_followed_by_capture() {
        let mut p = payment();
        p.mark_failed(Some("pay_upi".to_string())).unwrap();
        assert_eq!(p.status, PaymentStatus::Failed);
        assert!(p.status.is_open());

        p.mark_paid("pay_card", Some("card".to_string()), Timestamp::now()).unwrap();
        assert_eq!(p.status, PaymentStatus::Paid);
        assert_eq!(p.gateway_payment_id.as_deref(), Some("pay_card"));
        assert!(!p.status.is_open());
    }

    #[test]
    fn failed_is_not_failed_twice() {
        let mut p = payment();
        p.mark_failed(None).unwrap();
        assert!(p.mark_failed(None).is_err());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [PaymentStatus::Created, PaymentStatus::Paid, PaymentStatus::Failed] {
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
        }
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
