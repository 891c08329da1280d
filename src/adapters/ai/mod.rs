//! AI Adapters - Implementations of the AIProvider port.
//!
//! - `GeminiProvider` - Google Generative Language API
//! - `MockAIProvider` - Configurable test double

mod gemini_provider;
mod mock_ai_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider, GEMINI_KEY_NAME};
pub use mock_ai_provider::MockAIProvider;
