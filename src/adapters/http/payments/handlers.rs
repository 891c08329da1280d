//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use tracing::info;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, ApiJson, AppState};
use crate::application::handlers::payments::{
    CreateOrderCommand, HandlePaymentWebhookCommand, HandlePaymentWebhookResult,
    ListSubscriptionsQuery, VerifyPaymentCommand,
};
use crate::domain::foundation::Timestamp;

use super::dto::{
    CreateOrderRequest, CreateOrderResponse, SubscriptionListResponse, SubscriptionResponse,
    VerifyPaymentRequest, VerifyPaymentResponse, WebhookAck,
};

/// Header carrying the webhook body's HMAC.
pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// POST /api/payment/create-order - Open a gateway order for a plan
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = request.numeric_amount();
    let result = state
        .create_order_handler()
        .handle(CreateOrderCommand {
            user_id: user.id,
            plan_id: request.plan_id,
            amount,
            currency: request.currency,
            receipt: request.receipt,
        })
        .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order: result.order,
        payment_record_id: result.payment.id.to_string(),
    }))
}

/// POST /api/payment/verify-payment - Confirm a checkout and activate premium
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .verify_payment_handler()
        .handle(VerifyPaymentCommand {
            user_id: user.id,
            order_id: request.razorpay_order_id,
            payment_id: request.razorpay_payment_id,
            signature: request.razorpay_signature,
        })
        .await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified",
        activated: result.activated,
    }))
}

/// POST /api/payment/webhook - Gateway event delivery
///
/// The body is taken as raw bytes; the signature covers them exactly.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let result = state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    if let HandlePaymentWebhookResult::Ignored { event } = &result {
        info!(event = %event, "Webhook event acknowledged without action");
    }

    Ok(Json(WebhookAck { success: true }))
}

/// GET /api/payment/subscriptions - The caller's subscription history
pub async fn list_subscriptions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let subscriptions = state
        .list_subscriptions_handler()
        .handle(ListSubscriptionsQuery { user_id: user.id })
        .await?;

    let now = Timestamp::now();
    Ok(Json(SubscriptionListResponse {
        success: true,
        subscriptions: subscriptions
            .iter()
            .map(|s| SubscriptionResponse::from_subscription(s, now))
            .collect(),
    }))
}
