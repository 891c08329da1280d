//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::accounts::{
    GetCurrentUserHandler, GetCurrentUserQuery, LoginCommand, LoginHandler, LoginResult,
    SignupCommand, SignupHandler, SignupResult,
};
pub use handlers::chat::{
    DeleteChatSessionCommand, DeleteChatSessionHandler, GetChatSessionHandler,
    GetChatSessionQuery, ListChatSessionsHandler, ListChatSessionsQuery,
    PurgeExpiredChatSessionsCommand, PurgeExpiredChatSessionsHandler, SendChatMessageCommand,
    SendChatMessageHandler, SendChatMessageResult,
};
pub use handlers::features::{
    DiscoverResourcesHandler, DiscoverResourcesQuery, FeatureError, GenerateRoadmapHandler,
    GenerateRoadmapQuery, SearchResourcesHandler, SearchResourcesQuery,
};
pub use handlers::payments::{
    ActivationOutcome, CreateOrderCommand, CreateOrderHandler, CreateOrderResult,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    ListSubscriptionsHandler, ListSubscriptionsQuery, SubscriptionActivator, VerifyPaymentCommand,
    VerifyPaymentHandler, VerifyPaymentResult,
};
