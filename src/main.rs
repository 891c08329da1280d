//! SkillzUp backend server.
//!
//! Loads configuration, connects to Postgres, wires adapters into the HTTP
//! state and serves until Ctrl-C or SIGTERM.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillzup::adapters::ai::{GeminiConfig, GeminiProvider};
use skillzup::adapters::auth::{Argon2PasswordHasher, JwtSessionManager};
use skillzup::adapters::http::{build_app, AppSettings, AppState};
use skillzup::adapters::postgres::{
    self, PostgresChatSessionRepository, PostgresPaymentRepository,
    PostgresSubscriptionRepository, PostgresUserRepository,
};
use skillzup::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use skillzup::adapters::search::{HttpResourceFeed, N8nWorkflow};
use skillzup::application::{PurgeExpiredChatSessionsCommand, PurgeExpiredChatSessionsHandler};
use skillzup::config::{AppConfig, ChatConfig, ConfigError, ValidationError};
use skillzup::domain::foundation::Timestamp;
use skillzup::ports::{AIError, ChatSessionRepository, GatewayError, SearchError};

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("payment gateway: {0}")]
    Gateway(#[from] GatewayError),

    #[error("ai provider: {0}")]
    Ai(#[from] AIError),

    #[error("search client: {0}")]
    Search(#[from] SearchError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Server exited with error: {}", error);
        eprintln!("skillzup: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;
    info!(environment = ?config.server.environment, "Configuration loaded");

    let pool = postgres::connect(&config.database).await?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool).await?;
    }

    let chat_sessions: Arc<dyn ChatSessionRepository> =
        Arc::new(PostgresChatSessionRepository::new(pool.clone()));
    let sessions = Arc::new(JwtSessionManager::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_days,
    ));

    let gateway = RazorpayGateway::new(
        RazorpayConfig::new(
            config.payment.razorpay_key_id.clone(),
            config.payment.razorpay_key_secret.clone(),
        )
        .with_base_url(config.payment.api_base_url.clone())
        .with_timeout(std::time::Duration::from_secs(config.payment.timeout_secs)),
    )?;

    let ai = GeminiProvider::new(
        GeminiConfig::new(config.ai.gemini_api_key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;
    if !config.ai.has_gemini() {
        warn!("GEMINI_API_KEY not set; chat and roadmaps will fail until it is");
    }

    let search_timeout = config.search.timeout();
    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        chat_sessions: chat_sessions.clone(),
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        token_issuer: sessions.clone(),
        session_validator: sessions,
        payment_gateway: Arc::new(gateway),
        ai_provider: Arc::new(ai),
        video_feed: Arc::new(HttpResourceFeed::youtube(
            config.search.youtube_api_key.clone(),
            search_timeout,
        )?),
        news_feed: Arc::new(HttpResourceFeed::news(
            config.search.news_api_key.clone(),
            search_timeout,
        )?),
        article_feed: Arc::new(HttpResourceFeed::articles(
            config.search.article_api_key.clone(),
            search_timeout,
        )?),
        learning_workflow: Arc::new(N8nWorkflow::new(
            config.search.workflow_url.clone(),
            search_timeout,
        )?),
        settings: Arc::new(AppSettings::from_config(&config)),
    };

    spawn_chat_sweeper(chat_sessions, &config.chat);

    let app = build_app(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Server is running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

/// Deletes expired chat sessions every `purge_interval`.
fn spawn_chat_sweeper(sessions: Arc<dyn ChatSessionRepository>, config: &ChatConfig) {
    let handler = PurgeExpiredChatSessionsHandler::new(sessions);
    let mut interval = tokio::time::interval(config.purge_interval());

    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let cmd = PurgeExpiredChatSessionsCommand {
                now: Timestamp::now(),
            };
            if let Err(e) = handler.handle(cmd).await {
                error!(error = %e, "Chat session sweep failed");
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
