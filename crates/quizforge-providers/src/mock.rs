//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizforge_core::traits::{GenerateRequest, GenerateResponse, LlmProvider};

/// A mock LLM provider for driving the quiz engine without real API calls.
///
/// Replies are chosen by prompt substring; the first matching rule wins.
pub struct MockProvider {
    /// Ordered list of (prompt substring, reply).
    rules: Vec<(String, String)>,
    /// Reply used when no rule matches.
    default_response: String,
    call_count: AtomicU32,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockProvider {
    /// Create a mock from (prompt substring, reply) rules.
    pub fn new(rules: Vec<(String, String)>) -> Self {
        Self {
            rules,
            default_response: String::new(),
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same reply.
    pub fn with_fixed_response(response: &str) -> Self {
        Self::new(Vec::new()).with_default(response)
    }

    /// Add a rule answering prompts that contain `needle` with `reply`.
    pub fn on(mut self, needle: &str, reply: &str) -> Self {
        self.rules.push((needle.to_string(), reply.to_string()));
        self
    }

    pub fn with_default(mut self, response: &str) -> Self {
        self.default_response = response.to_string();
        self
    }

    /// Number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recent request received.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let content = self
            .rules
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(GenerateResponse {
            content,
            latency_ms: 1,
        })
    }
}
