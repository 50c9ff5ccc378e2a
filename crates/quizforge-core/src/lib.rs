//! quizforge-core — topic catalog, prompts, reply parsing and the quiz loop.
//!
//! This crate holds everything that does not talk HTTP: the provider trait,
//! the question/verdict engine built on top of it, and the interactive
//! session that drives rounds over any async reader and writer.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod traits;

pub use catalog::{pick_random_topic, pick_topic, TopicCatalog};
pub use engine::{QuizEngine, QuizEngineConfig};
pub use error::{ProviderError, QuizError};
pub use model::{Evaluation, GeneratedQa, SessionSummary};
pub use session::Session;
