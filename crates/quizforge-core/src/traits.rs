//! Core trait definitions for chat-completion providers.
//!
//! The trait is implemented by the `quizforge-providers` crate; the quiz
//! engine only ever talks to `dyn LlmProvider`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for LLM backends that turn a prompt into a text completion.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send one request and return the first completion.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
}

/// Request for a single chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gpt-3.5-turbo").
    pub model: String,
    /// The instruction. Sent as the only system-role message.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Message content of the first choice.
    pub content: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}
