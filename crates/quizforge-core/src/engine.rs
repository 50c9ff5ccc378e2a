//! Question generation and answer evaluation.
//!
//! Both operations are a single request to the configured provider. Provider
//! errors are returned to the caller untouched.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::model::{Evaluation, GeneratedQa};
use crate::parser::parse_reply;
use crate::prompt::{evaluation_prompt, question_prompt};
use crate::traits::{GenerateRequest, LlmProvider};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_LANGUAGE: &str = "JavaScript";
pub const DEFAULT_TEMPERATURE: f64 = 0.5;
pub const DEFAULT_QUESTION_MAX_TOKENS: u32 = 150;
pub const DEFAULT_VERDICT_MAX_TOKENS: u32 = 10;

/// Configuration for the quiz engine.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizEngineConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Programming language the questions are about.
    pub language: String,
    /// Sampling temperature for both requests.
    pub temperature: f64,
    /// Output bound for question generation.
    pub question_max_tokens: u32,
    /// Output bound for the verdict.
    pub verdict_max_tokens: u32,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            question_max_tokens: DEFAULT_QUESTION_MAX_TOKENS,
            verdict_max_tokens: DEFAULT_VERDICT_MAX_TOKENS,
        }
    }
}

/// Generates questions and judges answers through an [`LlmProvider`].
pub struct QuizEngine {
    provider: Arc<dyn LlmProvider>,
    config: QuizEngineConfig,
}

impl QuizEngine {
    pub fn new(provider: Arc<dyn LlmProvider>, config: QuizEngineConfig) -> Self {
        Self { provider, config }
    }

    /// Ask the provider for a question about `subtopic` and parse the reply.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn generate_question_and_answer(&self, subtopic: &str) -> Result<GeneratedQa> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: question_prompt(&self.config.language, subtopic),
            max_tokens: self.config.question_max_tokens,
            temperature: self.config.temperature,
        };

        let response = self.provider.generate(&request).await?;
        debug!(
            reply = %response.content,
            latency_ms = response.latency_ms,
            "question reply"
        );

        Ok(parse_reply(&response.content))
    }

    /// Ask the provider to judge `user_answer` against `correct_answer`.
    ///
    /// The reply text is returned as-is.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn evaluate_answer(&self, user_answer: &str, correct_answer: &str) -> Result<Evaluation> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: evaluation_prompt(user_answer, correct_answer),
            max_tokens: self.config.verdict_max_tokens,
            temperature: self.config.temperature,
        };

        let response = self.provider.generate(&request).await?;
        debug!(verdict = %response.content, latency_ms = response.latency_ms, "verdict reply");

        Ok(Evaluation(response.content))
    }
}
