//! quizforge-providers — chat-completion provider integrations.
//!
//! Implements the `LlmProvider` trait for OpenAI-compatible APIs, plus a
//! scripted mock, and loads the quizforge configuration.

pub mod config;
pub mod mock;
pub mod openai;

pub use config::{create_provider, load_config_from, load_dotenv, QuizforgeConfig};
pub use quizforge_core::error::ProviderError;
