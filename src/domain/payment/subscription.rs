//! Subscription record created when a payment settles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};

use super::Plan;

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "expired" => Ok(SubscriptionStatus::Expired),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            other => Err(format!("unknown subscription status: {}", other)),
        }
    }
}

/// A premium period bought by one settled payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    /// Gateway order that paid for this period. At most one subscription per order.
    pub order_id: String,
    pub plan: Plan,
    pub amount_minor: i64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: SubscriptionStatus,
    pub created_at: Timestamp,
}

impl Subscription {
    /// Starts an active subscription for `plan` beginning at `start`.
    pub fn activate(
        user_id: UserId,
        order_id: impl Into<String>,
        plan: Plan,
        amount_minor: i64,
        start: Timestamp,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            order_id: order_id.into(),
            plan,
            amount_minor,
            start_date: start,
            end_date: start.add_months(plan.months()),
            status: SubscriptionStatus::Active,
            created_at: start,
        }
    }

    /// Moves the period to begin at `from` when that is later than its
    /// current start. A renewal bought while premium is live queues behind
    /// the live period instead of overlapping it.
    pub fn queued_after(mut self, from: Timestamp) -> Self {
        if from.is_after(&self.start_date) {
            self.start_date = from;
            self.end_date = from.add_months(self.plan.months());
        }
        self
    }

    /// Status as observed at `now`; active records past their end read as expired.
    pub fn effective_status(&self, now: Timestamp) -> SubscriptionStatus {
        match self.status {
            SubscriptionStatus::Active if !self.end_date.is_after(&now) => {
                SubscriptionStatus::Expired
            }
            status => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};

    #[test]
    fn activate_spans_plan_months() {
        let start = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        let sub = Subscription::activate(UserId::new(), "order_1", Plan::FifteenMonths, 1500, start);

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.end_date.as_datetime().year(), 2026);
        assert_eq!(sub.end_date.as_datetime().month(), 6);
    }

    #[test]
    fn queued_after_live_period_starts_at_its_end() {
        let bought = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
        let live_until = bought.add_days(40);
        let sub = Subscription::activate(UserId::new(), "order_1", Plan::HalfYear, 500, bought)
            .queued_after(live_until);

        assert_eq!(sub.start_date, live_until);
        assert_eq!(sub.end_date, live_until.add_months(6));
        assert_eq!(sub.created_at, bought);
    }

    #[test]
    fn queued_after_past_time_is_unchanged() {
        let bought = Timestamp::now();
        let sub = Subscription::activate(UserId::new(), "order_1", Plan::Year, 1000, bought)
            .queued_after(bought.add_days(-3));

        assert_eq!(sub.start_date, bought);
        assert_eq!(sub.end_date, bought.add_months(12));
    }

    #[test]
    fn effective_status_expires_after_end_date() {
        let start = Timestamp::now();
        let sub = Subscription::activate(UserId::new(), "order_1", Plan::HalfYear, 500, start);

        assert_eq!(sub.effective_status(start), SubscriptionStatus::Active);
        assert_eq!(
            sub.effective_status(start.add_months(7)),
            SubscriptionStatus::Expired
        );
    }

    #[test]
    fn cancelled_stays_cancelled() {
        let start = Timestamp::now();
        let mut sub = Subscription::activate(UserId::new(), "order_1", Plan::Year, 1000, start);
        sub.status = SubscriptionStatus::Cancelled;
        assert_eq!(sub.effective_status(start), SubscriptionStatus::Cancelled);
    }
}
