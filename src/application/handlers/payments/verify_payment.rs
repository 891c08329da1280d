//! VerifyPaymentHandler - Command handler for the client-side checkout confirmation.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::UserId;
use crate::domain::payment::{checkout_payload, PaymentError, SignatureVerifier};
use crate::ports::PaymentRepository;

use super::{ActivationOutcome, SubscriptionActivator};

/// Command carrying the checkout widget's success callback fields.
#[derive(Debug, Clone, Default)]
pub struct VerifyPaymentCommand {
    pub user_id: UserId,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
}

/// Result of a verified checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentResult {
    /// False when the webhook (or an earlier verify) already settled the order.
    pub activated: bool,
}

/// Handler for checkout confirmation.
///
/// The signature proves the gateway issued `payment_id` for `order_id`;
/// the order must also belong to the caller before it is settled.
pub struct VerifyPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    activator: Arc<SubscriptionActivator>,
    verifier: SignatureVerifier,
}

impl VerifyPaymentHandler {
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

    pub async fn handle(&self, cmd: VerifyPaymentCommand) -> Result<VerifyPaymentResult, PaymentError> {
        let (Some(order_id), Some(payment_id), Some(signature)) = (
            non_blank(cmd.order_id),
            non_blank(cmd.payment_id),
            non_blank(cmd.signature),
        ) else {
            return Err(PaymentError::validation("razorpay", "Missing fields"));
        };

        let payload = checkout_payload(&order_id, &payment_id);
        if let Err(e) = self.verifier.verify(payload.as_bytes(), &signature) {
            warn!(order_id = %order_id, user_id = %cmd.user_id, "Checkout signature mismatch");
            return Err(e);
        }

        let payment = self
            .payments
            .find_by_order_id(&order_id)
            .await?
            .filter(|p| p.user_id == cmd.user_id)
            .ok_or_else(|| PaymentError::order_not_found(&order_id))?;

        let outcome = self.activator.activate(&payment, &payment_id, None).await?;

        Ok(VerifyPaymentResult {
            activated: matches!(outcome, ActivationOutcome::Activated(_)),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
