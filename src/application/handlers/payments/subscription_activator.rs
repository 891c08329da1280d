//! SubscriptionActivator - Shared settlement step for verify and webhook paths.
//!
//! Settling a payment takes three writes: mark the payment paid, record the
//! subscription, grant premium on the user. They are not transactional, so
//! each step is made safe to repeat:
//!
//! - `mark_paid` is conditional on the payment still being open (`created`
//!   or `failed` after an earlier attempt); only one caller wins
//! - a payment already `paid` without a subscription is re-activated, which
//!   lets a gateway redelivery finish an activation that failed half-way
//! - `subscriptions.order_id` is unique, so two repairs cannot both insert
//!
//! A purchase made while premium is still live extends it: the new period
//! starts where the current one ends.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::{ErrorCode, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentStatus, Plan, Subscription};
use crate::domain::user::PremiumStatus;
use crate::ports::{PaymentRepository, SubscriptionRepository, UserRepository};

/// What an activation attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// This call created the subscription and granted premium.
    Activated(Subscription),
    /// Another delivery already settled this order; nothing was written.
    AlreadyProcessed,
}

impl ActivationOutcome {
    pub fn is_activated(&self) -> bool {
        matches!(self, ActivationOutcome::Activated(_))
    }
}

/// Settles a captured payment into a subscription.
pub struct SubscriptionActivator {
    payments: Arc<dyn PaymentRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    users: Arc<dyn UserRepository>,
}

impl SubscriptionActivator {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            payments,
            subscriptions,
            users,
        }
    }

    /// Activates the subscription bought by `payment`.
    ///
    /// `payment` is the record as read by the caller; its status decides
    /// whether this call claims the transition or repairs a prior one.
    pub async fn activate(
        &self,
        payment: &Payment,
        gateway_payment_id: &str,
        method: Option<&str>,
    ) -> Result<ActivationOutcome, PaymentError> {
        let order_id = payment.order_id.as_str();
        let now = Timestamp::now();

        match payment.status {
            PaymentStatus::Created | PaymentStatus::Failed => {
                let claimed = self
                    .payments
                    .mark_paid(order_id, gateway_payment_id, method, now)
                    .await?;
                if !claimed {
                    return self.lost_race(order_id).await;
                }
                info!(order_id = %order_id, payment_id = %gateway_payment_id, "Payment marked paid");
            }
            PaymentStatus::Paid => {
                if self.subscriptions.find_by_order_id(order_id).await?.is_some() {
                    return Ok(ActivationOutcome::AlreadyProcessed);
                }
                warn!(order_id = %order_id, "Paid order has no subscription; re-activating");
            }
        }

        let plan = Plan::from_price_minor(payment.amount_minor)
            .ok_or(PaymentError::UnknownAmount(payment.amount_major()))?;

        let starts_at = self.period_start(&payment.user_id, now).await?;
        let subscription =
            Subscription::activate(payment.user_id, order_id, plan, payment.amount_minor, now)
                .queued_after(starts_at);

        if let Err(e) = self.subscriptions.save(&subscription).await {
            if e.code == ErrorCode::SubscriptionExists {
                return Ok(ActivationOutcome::AlreadyProcessed);
            }
            error!(order_id = %order_id, error = %e, "Subscription write failed after payment was marked paid");
            return Err(e.into());
        }

        let premium = PremiumStatus::granted(plan, subscription.end_date);
        if let Err(e) = self.users.update_premium(&payment.user_id, &premium).await {
            error!(order_id = %order_id, user_id = %payment.user_id, error = %e, "Premium grant failed");
            return Err(e.into());
        }

        info!(
            order_id = %order_id,
            user_id = %payment.user_id,
            plan = %plan.id(),
            months = plan.months(),
            expires_at = ?subscription.end_date,
            "Subscription activated"
        );

        Ok(ActivationOutcome::Activated(subscription))
    }

    /// End of the user's live premium, or `now` when there is none.
    async fn period_start(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Timestamp, PaymentError> {
        let live_until = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|user| user.has_active_premium(now))
            .and_then(|user| user.premium.expires_at);
        Ok(live_until.map_or(now, |expires| expires.max(now)))
    }

    async fn lost_race(&self, order_id: &str) -> Result<ActivationOutcome, PaymentError> {
        let current = self
            .payments
            .find_by_order_id(order_id)
            .await?
            .ok_or_else(|| PaymentError::order_not_found(order_id))?;

        if current.status.is_open() {
            return Err(PaymentError::invalid_transition(
                current.status,
                PaymentStatus::Paid,
            ));
        }
        Ok(ActivationOutcome::AlreadyProcessed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryPaymentRepository, InMemorySubscriptionRepository, InMemoryUserRepository,
    };
    use crate::domain::foundation::UserId;
    use crate::domain::user::{NewAccount, User};

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    struct Fixture {
        payments: Arc<InMemoryPaymentRepository>,
        subscriptions: Arc<InMemorySubscriptionRepository>,
        users: Arc<InMemoryUserRepository>,
        activator: SubscriptionActivator,
        user_id: UserId,
    }

    async fn fixture() -> Fixture {
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::register(
            NewAccount {
                name: "Kiran".to_string(),
                email: "kiran@example.com".to_string(),
                username: "kiran".to_string(),
                password: "secret1".to_string(),
            },
            "hash",
            Timestamp::now(),
        );
        users.create(&user).await.unwrap();

        let activator =
            SubscriptionActivator::new(payments.clone(), subscriptions.clone(), users.clone());
        Fixture {
            payments,
            subscriptions,
            users,
            activator,
            user_id: user.id,
        }
    }

    async fn created_payment(f: &Fixture, plan: Plan) -> Payment {
        let payment = Payment::create(f.user_id, plan, "INR", "order_1", Timestamp::now());
        f.payments.save(&payment).await.unwrap();
        payment
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn activates_plan_and_grants_premium() {
        let f = fixture().await;
        let payment = created_payment(&f, Plan::Year).await;

        let outcome = f.activator.activate(&payment, "pay_1", Some("upi")).await.unwrap();

        let ActivationOutcome::Activated(subscription) = outcome else {
            panic!("expected activation");
        };
        assert_eq!(subscription.plan, Plan::Year);
        let user = f.users.find_by_id(&f.user_id).await.unwrap().unwrap();
        assert!(user.has_active_premium(Timestamp::now()));
        assert_eq!(user.premium.plan, Some(Plan::Year));

        let stored = f.payments.find_by_order_id("order_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
        assert_eq!(stored.gateway_payment_id.as_deref(), Some("pay_1"));
    }

    #[tokio::test]
    async fn stale_created_read_is_already_processed() {
        let f = fixture().await;
        let payment = created_payment(&f, Plan::HalfYear).await;

        f.activator.activate(&payment, "pay_1", None).await.unwrap();
        let second = f.activator.activate(&payment, "pay_1", None).await.unwrap();

        assert_eq!(second, ActivationOutcome::AlreadyProcessed);
        assert_eq!(f.subscriptions.count().await, 1);
    }

    #[tokio::test]
    async fn paid_without_subscription_is_repaired() {
        let f = fixture().await;
        created_payment(&f, Plan::FifteenMonths).await;
        f.payments
            .mark_paid("order_1", "pay_1", None, Timestamp::now())
            .await
            .unwrap();
        let paid = f.payments.find_by_order_id("order_1").await.unwrap().unwrap();

        let outcome = f.activator.activate(&paid, "pay_1", None).await.unwrap();

        assert!(outcome.is_activated());
        assert_eq!(f.subscriptions.count().await, 1);
        let again = f.activator.activate(&paid, "pay_1", None).await.unwrap();
        assert_eq!(again, ActivationOutcome::AlreadyProcessed);
    }

    #[tokio::test]
    async fn capture_after_failed_attempt_activates() {
        let f = fixture().await;
        created_payment(&f, Plan::Year).await;
        f.payments.mark_failed("order_1", Some("pay_upi")).await.unwrap();
        let failed = f.payments.find_by_order_id("order_1").await.unwrap().unwrap();

        let outcome = f.activator.activate(&failed, "pay_card", Some("card")).await.unwrap();

        assert!(outcome.is_activated());
        assert_eq!(f.subscriptions.count().await, 1);
        let stored = f.payments.find_by_order_id("order_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
        assert_eq!(stored.gateway_payment_id.as_deref(), Some("pay_card"));
    }

    #[tokio::test]
    async fn purchase_during_live_premium_extends_it() {
        let f = fixture().await;
        let live_until = Timestamp::now().add_days(100);
        f.users
            .update_premium(&f.user_id, &PremiumStatus::granted(Plan::Year, live_until))
            .await
            .unwrap();
        let payment = created_payment(&f, Plan::HalfYear).await;

        let outcome = f.activator.activate(&payment, "pay_1", None).await.unwrap();

        let ActivationOutcome::Activated(subscription) = outcome else {
            panic!("expected activation");
        };
        assert_eq!(subscription.start_date, live_until);
        assert_eq!(subscription.end_date, live_until.add_months(6));
        let user = f.users.find_by_id(&f.user_id).await.unwrap().unwrap();
        assert_eq!(user.premium.expires_at, Some(live_until.add_months(6)));
        assert_eq!(user.premium.plan, Some(Plan::HalfYear));
    }

    #[tokio::test]
    async fn lapsed_premium_restarts_from_now() {
        let f = fixture().await;
        let lapsed = Timestamp::now().add_days(-10);
        f.users
            .update_premium(&f.user_id, &PremiumStatus::granted(Plan::Year, lapsed))
            .await
            .unwrap();
        let payment = created_payment(&f, Plan::HalfYear).await;

        let outcome = f.activator.activate(&payment, "pay_1", None).await.unwrap();

        let ActivationOutcome::Activated(subscription) = outcome else {
            panic!("expected activation");
        };
        assert!(subscription.start_date.is_after(&lapsed));
        let user = f.users.find_by_id(&f.user_id).await.unwrap().unwrap();
        assert!(user.premium.expires_at.unwrap().is_after(&Timestamp::now().add_months(5)));
    }
}
