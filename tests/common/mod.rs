//! Shared fixtures for HTTP integration tests.
//!
//! Builds the real router over in-memory repositories, a real JWT session
//! manager and mock external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use secrecy::Secret;
use serde_json::Value;
use tower::ServiceExt;

use skillzup::adapters::ai::MockAIProvider;
use skillzup::adapters::auth::{JwtSessionManager, PlaintextPasswordHasher};
use skillzup::adapters::http::{build_app, AppSettings, AppState};
use skillzup::adapters::memory::{
    InMemoryChatSessionRepository, InMemoryPaymentRepository, InMemorySubscriptionRepository,
    InMemoryUserRepository,
};
use skillzup::adapters::razorpay::MockPaymentGateway;
use skillzup::adapters::search::{MockLearningWorkflow, MockResourceFeed};
use skillzup::config::ServerConfig;
use skillzup::ports::{LearningWorkflow, ResourceFeed, ResourceSource};

pub const JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";
pub const CHECKOUT_SECRET: &str = "checkout-secret";
pub const WEBHOOK_SECRET: &str = "webhook-secret";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// External services a test may want to replace.
pub struct TestDeps {
    pub ai: MockAIProvider,
    pub video_feed: Arc<dyn ResourceFeed>,
    pub news_feed: Arc<dyn ResourceFeed>,
    pub article_feed: Arc<dyn ResourceFeed>,
    pub workflow: Arc<dyn LearningWorkflow>,
}

impl Default for TestDeps {
    fn default() -> Self {
        Self {
            ai: MockAIProvider::new(),
            video_feed: Arc::new(MockResourceFeed::new(ResourceSource::Videos, vec![])),
            news_feed: Arc::new(MockResourceFeed::new(ResourceSource::News, vec![])),
            article_feed: Arc::new(MockResourceFeed::new(ResourceSource::Articles, vec![])),
            workflow: Arc::new(MockLearningWorkflow::new(serde_json::json!({}))),
        }
    }
}

/// The application plus handles on its storage and mocks.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub payments: Arc<InMemoryPaymentRepository>,
    pub subscriptions: Arc<InMemorySubscriptionRepository>,
    pub chat_sessions: Arc<InMemoryChatSessionRepository>,
    pub gateway: MockPaymentGateway,
    pub ai: MockAIProvider,
}

/// A response with its body parsed as JSON (`Null` when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` of the first Set-Cookie header.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn raw_set_cookie(&self) -> String {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_deps(TestDeps::default())
    }

    pub fn with_deps(deps: TestDeps) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let chat_sessions = Arc::new(InMemoryChatSessionRepository::new());
        let gateway = MockPaymentGateway::new();
        let sessions = Arc::new(JwtSessionManager::new(JWT_SECRET, 7));

        let state = AppState {
            users: users.clone(),
            payments: payments.clone(),
            subscriptions: subscriptions.clone(),
            chat_sessions: chat_sessions.clone(),
            password_hasher: Arc::new(PlaintextPasswordHasher),
            token_issuer: sessions.clone(),
            session_validator: sessions,
            payment_gateway: Arc::new(gateway.clone()),
            ai_provider: Arc::new(deps.ai.clone()),
            video_feed: deps.video_feed,
            news_feed: deps.news_feed,
            article_feed: deps.article_feed,
            learning_workflow: deps.workflow,
            settings: Arc::new(AppSettings {
                cookie_name: "token".to_string(),
                secure_cookies: false,
                token_ttl_days: 7,
                currency: "INR".to_string(),
                checkout_secret: Secret::new(CHECKOUT_SECRET.to_string()),
                webhook_secret: Secret::new(WEBHOOK_SECRET.to_string()),
                chat_history_window: 20,
                chat_session_ttl_days: 7,
            }),
        };

        Self {
            router: build_app(state, &ServerConfig::default()),
            users,
            payments,
            subscriptions,
            chat_sessions,
            gateway,
            ai: deps.ai,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, None, cookie)).await
    }

    pub async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::POST, uri, Some(body), cookie)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, None, cookie)).await
    }

    /// Registers `username` and returns its session cookie and user id.
    pub async fn signup(&self, username: &str) -> (String, String) {
        let response = self
            .post(
                "/api/auth/signup",
                serde_json::json!({
                    "name": "Test User",
                    "email": format!("{}@example.com", username),
                    "username": username,
                    "password": "secret1"
                }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        let cookie = response.session_cookie().expect("signup sets cookie");
        let id = response.body["user"]["id"]
            .as_str()
            .expect("user id")
            .to_string();
        (cookie, id)
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}
