//! HandlePaymentWebhookHandler - Command handler for gateway webhook deliveries.
//!
//! Deliveries may repeat or race each other. Every path is safe to run more
//! than once for the same order; see `SubscriptionActivator`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::payment::{GatewayEvent, Payment, PaymentError, SignatureVerifier};
use crate::ports::PaymentRepository;

use super::{ActivationOutcome, SubscriptionActivator};

/// Command carrying a raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the signature header, if present.
    pub signature: Option<String>,
}

/// Result of processing a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Payment captured and subscription activated by this delivery.
    Activated { order_id: String },
    /// The order was already settled; nothing changed.
    AlreadyProcessed { order_id: String },
    /// Payment recorded as failed.
    MarkedFailed { order_id: String },
    /// Event type this service does not act on.
    Ignored { event: String },
}

/// Handler for gateway webhooks.
pub struct HandlePaymentWebhookHandler {
    payments: Arc<dyn PaymentRepository>,
    activator: Arc<SubscriptionActivator>,
    verifier: SignatureVerifier,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        activator: Arc<SubscriptionActivator>,
        verifier: SignatureVerifier,
    ) -> Self {
        Self {
            payments,
            activator,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, PaymentError> {
        let signature = cmd.signature.ok_or(PaymentError::MissingSignature)?;

        if let Err(e) = self.verifier.verify(&cmd.payload, &signature) {
            warn!(error = %e, "Rejected webhook delivery");
            return Err(e);
        }

        match GatewayEvent::parse(&cmd.payload)? {
            GatewayEvent::Captured(captured) => {
                let payment = self.find(&captured.order_id).await?;

                if captured.amount_minor != payment.amount_minor {
                    warn!(
                        order_id = %captured.order_id,
                        expected = payment.amount_minor,
                        actual = captured.amount_minor,
                        "Captured amount differs from order"
                    );
                    return Err(PaymentError::AmountMismatch {
                        expected: payment.amount_minor,
                        actual: captured.amount_minor,
                    });
                }

                let outcome = self
                    .activator
                    .activate(&payment, &captured.payment_id, captured.method.as_deref())
                    .await?;

                Ok(match outcome {
                    ActivationOutcome::Activated(_) => HandlePaymentWebhookResult::Activated {
                        order_id: captured.order_id,
                    },
                    ActivationOutcome::AlreadyProcessed => {
                        info!(order_id = %captured.order_id, "Duplicate capture delivery");
                        HandlePaymentWebhookResult::AlreadyProcessed {
                            order_id: captured.order_id,
                        }
                    }
                })
            }
            GatewayEvent::Failed(failed) => {
                self.find(&failed.order_id).await?;

                let marked = self
                    .payments
                    .mark_failed(&failed.order_id, failed.payment_id.as_deref())
                    .await?;

                if !marked {
                    return Ok(HandlePaymentWebhookResult::AlreadyProcessed {
                        order_id: failed.order_id,
                    });
                }

                info!(
                    order_id = %failed.order_id,
                    reason = failed.reason.as_deref().unwrap_or("unknown"),
                    "Payment failed"
                );
                Ok(HandlePaymentWebhookResult::MarkedFailed {
                    order_id: failed.order_id,
                })
            }
            GatewayEvent::Ignored(event) => Ok(HandlePaymentWebhookResult::Ignored { event }),
        }
    }

    async fn find(&self, order_id: &str) -> Result<Payment, PaymentError> {
        match self.payments.find_by_order_id(order_id).await? {
            Some(payment) => Ok(payment),
            None => {
                warn!(order_id = %order_id, "Webhook for unknown order");
                Err(PaymentError::order_not_found(order_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::UserRepository;
    use crate::adapters::memory::{
        InMemoryPaymentRepository, InMemorySubscriptionRepository, InMemoryUserRepository,
    };
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::{PaymentStatus, Plan, SignatureKind};
    use crate::domain::user::{NewAccount, User};
    use proptest::prelude::*;
    use serde_json::json;

    const WEBHOOK_SECRET: &str = "whsec_test";

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    struct Fixture {
        handler: HandlePaymentWebhookHandler,
        payments: Arc<InMemoryPaymentRepository>,
        subscriptions: Arc<InMemorySubscriptionRepository>,
    }

    async fn fixture() -> Fixture {
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::register(
            NewAccount {
                name: "Dev".to_string(),
                email: "dev@example.com".to_string(),
                username: "dev".to_string(),
                password: "secret1".to_string(),
            },
            "hash",
            Timestamp::now(),
        );
        users.create(&user).await.unwrap();
        payments
            .save(&Payment::create(user.id, Plan::HalfYear, "INR", "order_w", Timestamp::now()))
            .await
            .unwrap();

        let activator = Arc::new(SubscriptionActivator::new(
            payments.clone(),
            subscriptions.clone(),
            users,
        ));
        Fixture {
            handler: HandlePaymentWebhookHandler::new(
                payments.clone(),
                activator,
                SignatureVerifier::webhook(WEBHOOK_SECRET),
            ),
            payments,
            subscriptions,
        }
    }

    fn captured_body(order_id: &str, amount: i64) -> Vec<u8> {
        json!({
            "event": "payment.captured",
            "payload": {"payment": {"entity": {
                "id": "pay_w",
                "order_id": order_id,
                "amount": amount,
                "currency": "INR",
                "method": "card"
            }}}
        })
        .to_string()
        .into_bytes()
    }

    fn failed_body(order_id: &str) -> Vec<u8> {
        json!({
            "event": "payment.failed",
            "payload": {"payment": {"entity": {
                "id": "pay_f",
                "order_id": order_id,
                "error_description": "card declined"
            }}}
        })
        .to_string()
        .into_bytes()
    }

    fn signed(payload: Vec<u8>) -> HandlePaymentWebhookCommand {
        let signature = SignatureVerifier::webhook(WEBHOOK_SECRET).sign(&payload);
        HandlePaymentWebhookCommand {
            payload,
            signature: Some(signature),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn capture_activates_subscription() {
        let f = fixture().await;
        let cmd = signed(captured_body("order_w", Plan::HalfYear.price_minor()));

        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(
            result,
            HandlePaymentWebhookResult::Activated {
                order_id: "order_w".to_string()
            }
        );
        assert_eq!(f.subscriptions.count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_delivery_creates_one_subscription() {
        let f = fixture().await;
        let cmd = signed(captured_body("order_w", Plan::HalfYear.price_minor()));

        f.handler.handle(cmd.clone()).await.unwrap();
        let second = f.handler.handle(cmd).await.unwrap();

        assert!(matches!(second, HandlePaymentWebhookResult::AlreadyProcessed { .. }));
        assert_eq!(f.subscriptions.count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_deliveries_create_one_subscription() {
        let f = Arc::new(fixture().await);
        let cmd = signed(captured_body("order_w", Plan::HalfYear.price_minor()));

        let (a, b) = tokio::join!(f.handler.handle(cmd.clone()), f.handler.handle(cmd));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(f.subscriptions.count().await, 1);
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(HandlePaymentWebhookCommand {
                payload: captured_body("order_w", 500),
                signature: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, PaymentError::MissingSignature);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(signed(captured_body("order_nope", 500)))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Payment record not found");
    }

    #[tokio::test]
    async fn amount_mismatch_is_rejected() {
        let f = fixture().await;
        let err = f
            .handler
            .handle(signed(captured_body("order_w", 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::AmountMismatch { .. }));
        assert_eq!(f.subscriptions.count().await, 0);
    }

    #[tokio::test]
    async fn failure_event_marks_payment_failed() {
        let f = fixture().await;

        let result = f.handler.handle(signed(failed_body("order_w"))).await.unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::MarkedFailed { .. }));
        let stored = f.payments.find_by_order_id("order_w").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn capture_after_failed_attempt_activates() {
        let f = fixture().await;
        f.handler.handle(signed(failed_body("order_w"))).await.unwrap();

        let result = f
            .handler
            .handle(signed(captured_body("order_w", Plan::HalfYear.price_minor())))
            .await
            .unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::Activated { .. }));
        assert_eq!(f.subscriptions.count().await, 1);
        let stored = f.payments.find_by_order_id("order_w").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn late_failure_does_not_reopen_paid_order() {
        let f = fixture().await;
        f.handler
            .handle(signed(captured_body("order_w", Plan::HalfYear.price_minor())))
            .await
            .unwrap();

        let result = f.handler.handle(signed(failed_body("order_w"))).await.unwrap();

        assert!(matches!(result, HandlePaymentWebhookResult::AlreadyProcessed { .. }));
        let stored = f.payments.find_by_order_id("order_w").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn other_events_are_acknowledged() {
        let f = fixture().await;
        let body = json!({"event": "refund.created", "payload": {}}).to_string().into_bytes();

        let result = f.handler.handle(signed(body)).await.unwrap();

        assert_eq!(
            result,
            HandlePaymentWebhookResult::Ignored {
                event: "refund.created".to_string()
            }
        );
    }

    proptest! {
        #[test]
        fn any_mutated_body_is_rejected(index in 0usize..256, flip in 1u8..=255) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (result, subscriptions) = rt.block_on(async {
                let f = fixture().await;
                let mut cmd = signed(captured_body("order_w", Plan::HalfYear.price_minor()));
                let i = index % cmd.payload.len();
                cmd.payload[i] ^= flip;
                let result = f.handler.handle(cmd).await;
                (result, f.subscriptions.count().await)
            });

            prop_assert_eq!(result, Err(PaymentError::InvalidSignature(SignatureKind::Webhook)));
            prop_assert_eq!(subscriptions, 0);
        }

        #[test]
        fn any_mutated_signature_is_rejected(index in 0usize..64, replacement in "[0-9a-f]") {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let payload = captured_body("order_w", Plan::HalfYear.price_minor());
            let mut cmd = signed(payload);
            let mut chars: Vec<char> = cmd.signature.clone().unwrap_or_default().chars().collect();
            let i = index % chars.len();
            let new_char = replacement.chars().next().unwrap_or('0');
            prop_assume!(chars[i] != new_char);
            chars[i] = new_char;
            cmd.signature = Some(chars.into_iter().collect());

            let result = rt.block_on(async { fixture().await.handler.handle(cmd).await });

            prop_assert_eq!(result, Err(PaymentError::InvalidSignature(SignatureKind::Webhook)));
        }
    }
}
