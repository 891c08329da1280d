//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};

use crate::application::handlers::accounts::{GetCurrentUserHandler, LoginHandler, SignupHandler};
use crate::application::handlers::chat::{
    DeleteChatSessionHandler, GetChatSessionHandler, ListChatSessionsHandler,
    SendChatMessageHandler,
};
use crate::application::handlers::features::{
    DiscoverResourcesHandler, GenerateRoadmapHandler, SearchResourcesHandler,
};
use crate::application::handlers::payments::{
    CreateOrderHandler, HandlePaymentWebhookHandler, ListSubscriptionsHandler,
    SubscriptionActivator, VerifyPaymentHandler,
};
use crate::config::AppConfig;
use crate::domain::payment::SignatureVerifier;
use crate::ports::{
    AIProvider, ChatSessionRepository, LearningWorkflow, PasswordHasher, PaymentGateway,
    PaymentRepository, ResourceFeed, ResourceSource, SessionValidator, SubscriptionRepository,
    TokenIssuer, UserRepository,
};

/// Request-independent settings the routes need.
pub struct AppSettings {
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Adds `Secure` to the session cookie.
    pub secure_cookies: bool,
    /// Session lifetime, also the cookie `Max-Age`.
    pub token_ttl_days: i64,
    /// Only currency orders may be placed in.
    pub currency: String,
    /// Key secret that signs checkout confirmations.
    pub checkout_secret: Secret<String>,
    /// Secret that signs webhook bodies.
    pub webhook_secret: Secret<String>,
    /// Prior messages sent to the model per chat turn.
    pub chat_history_window: usize,
    /// Chat session lifetime.
    pub chat_session_ttl_days: i64,
}

impl AppSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.auth.cookie_name.clone(),
            secure_cookies: config.is_production(),
            token_ttl_days: config.auth.token_ttl_days,
            currency: config.payment.currency.clone(),
            checkout_secret: Secret::new(config.payment.razorpay_key_secret.clone()),
            webhook_secret: Secret::new(config.payment.razorpay_webhook_secret.clone()),
            chat_history_window: config.ai.chat_history_window,
            chat_session_ttl_days: config.chat.session_ttl_days,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub chat_sessions: Arc<dyn ChatSessionRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub ai_provider: Arc<dyn AIProvider>,
    pub video_feed: Arc<dyn ResourceFeed>,
    pub news_feed: Arc<dyn ResourceFeed>,
    pub article_feed: Arc<dyn ResourceFeed>,
    pub learning_workflow: Arc<dyn LearningWorkflow>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    // ── Accounts ────────────────────────────────────────────────────────────

    pub fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(
            self.users.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    // ── Chat ────────────────────────────────────────────────────────────────

    pub fn send_chat_message_handler(&self) -> SendChatMessageHandler {
        SendChatMessageHandler::new(
            self.chat_sessions.clone(),
            self.ai_provider.clone(),
            self.settings.chat_history_window,
            self.settings.chat_session_ttl_days,
        )
    }

    pub fn get_chat_session_handler(&self) -> GetChatSessionHandler {
        GetChatSessionHandler::new(self.chat_sessions.clone())
    }

    pub fn list_chat_sessions_handler(&self) -> ListChatSessionsHandler {
        ListChatSessionsHandler::new(self.chat_sessions.clone())
    }

    pub fn delete_chat_session_handler(&self) -> DeleteChatSessionHandler {
        DeleteChatSessionHandler::new(self.chat_sessions.clone())
    }

    // ── Features ────────────────────────────────────────────────────────────

    pub fn roadmap_handler(&self) -> GenerateRoadmapHandler {
        GenerateRoadmapHandler::new(self.ai_provider.clone())
    }

    pub fn search_handler(&self, source: ResourceSource) -> SearchResourcesHandler {
        let feed = match source {
            ResourceSource::Videos => self.video_feed.clone(),
            ResourceSource::News => self.news_feed.clone(),
            ResourceSource::Articles => self.article_feed.clone(),
        };
        SearchResourcesHandler::new(feed)
    }

    pub fn discover_handler(&self) -> DiscoverResourcesHandler {
        DiscoverResourcesHandler::new(self.learning_workflow.clone())
    }

    // ── Payments ────────────────────────────────────────────────────────────

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.payment_gateway.clone(),
            self.payments.clone(),
            self.settings.currency.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.payments.clone(),
            Arc::new(self.activator()),
            SignatureVerifier::checkout(self.settings.checkout_secret.expose_secret().clone()),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payments.clone(),
            Arc::new(self.activator()),
            SignatureVerifier::webhook(self.settings.webhook_secret.expose_secret().clone()),
        )
    }

    pub fn list_subscriptions_handler(&self) -> ListSubscriptionsHandler {
        ListSubscriptionsHandler::new(self.subscriptions.clone())
    }

    fn activator(&self) -> SubscriptionActivator {
        SubscriptionActivator::new(
            self.payments.clone(),
            self.subscriptions.clone(),
            self.users.clone(),
        )
    }
}
