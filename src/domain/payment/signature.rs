//! Payment gateway signature verification.
//!
//! The gateway signs two things with HMAC-SHA256 and sends the digest as
//! lowercase hex:
//!
//! - the checkout result `"{order_id}|{payment_id}"`, keyed with the API key secret
//! - every webhook body, keyed with the webhook secret
//!
//! Both are checked here with a constant-time comparison.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::SignatureKind;
use super::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Builds the payload the gateway signs for a completed checkout.
pub fn checkout_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// Verifier bound to one shared secret.
pub struct SignatureVerifier {
    secret: Secret<String>,
    kind: SignatureKind,
}

impl SignatureVerifier {
    /// Verifier for checkout confirmations (key secret).
    pub fn checkout(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            kind: SignatureKind::Checkout,
        }
    }

    /// Verifier for webhook deliveries (webhook secret).
    pub fn webhook(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            kind: SignatureKind::Webhook,
        }
    }

    /// Computes the raw HMAC-SHA256 of `payload`.
    fn compute(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Hex-encoded signature for `payload`.
    pub fn sign(&self, payload: &[u8]) -> String {
        hex::encode(self.compute(payload))
    }

    /// Verifies a hex signature over `payload`.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` - the signature is empty
    /// - `InvalidSignature` - not hex, wrong length, or wrong digest
    pub fn verify(&self, payload: &[u8], signature_hex: &str) -> Result<(), PaymentError> {
        let signature_hex = signature_hex.trim();
        if signature_hex.is_empty() {
            return Err(PaymentError::MissingSignature);
        }

        let provided = hex::decode(signature_hex.to_ascii_lowercase())
            .map_err(|_| PaymentError::InvalidSignature(self.kind))?;
        let expected = self.compute(payload);

        if !constant_time_compare(&expected, &provided) {
            return Err(PaymentError::InvalidSignature(self.kind));
        }

        Ok(())
    }
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
