//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Accounts with unique email/username
//! - `PaymentRepository` - Gateway orders with compare-and-set settlement
//! - `SubscriptionRepository` - Premium periods, one per order
//! - `ChatSessionRepository` - Expiring chat sessions and their messages
//!
//! ## Integration Ports
//!
//! - `PaymentGateway` - Order creation at the payment provider
//! - `AIProvider` - Generative text completions
//! - `ResourceFeed` / `LearningWorkflow` - External resource search
//!
//! ## Security Ports
//!
//! - `PasswordHasher` - One-way password hashing
//! - `TokenIssuer` / `SessionValidator` - Session tokens

mod ai_provider;
mod chat_session_repository;
mod password_hasher;
mod payment_gateway;
mod payment_repository;
mod resource_feed;
mod session_validator;
mod subscription_repository;
mod user_repository;

pub use ai_provider::{AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole};
pub use chat_session_repository::ChatSessionRepository;
pub use password_hasher::PasswordHasher;
pub use payment_gateway::{GatewayError, GatewayErrorCode, GatewayOrder, OrderRequest, PaymentGateway};
pub use payment_repository::PaymentRepository;
pub use resource_feed::{LearningWorkflow, ResourceFeed, ResourceSource, SearchError};
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use subscription_repository::SubscriptionRepository;
pub use user_repository::UserRepository;
