//! The interactive quiz loop.
//!
//! Each round picks a subtopic, generates a question, prints it, reads one
//! line of input and, unless the line is the quit sentinel, judges it and
//! prints the verdict with the reference answer. The loop ends on the quit
//! sentinel, at end of input, or after `max_rounds` evaluated rounds. Input
//! is never read again once the loop has decided to stop.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::catalog::{pick_topic, TopicCatalog};
use crate::engine::QuizEngine;
use crate::model::SessionSummary;

/// Input that ends the session, compared case-insensitively.
pub const QUIT_SENTINEL: &str = "quit";

/// Returns `true` if `input` is the quit sentinel.
pub fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case(QUIT_SENTINEL)
}

/// One interactive quiz session.
pub struct Session<'a> {
    engine: &'a QuizEngine,
    catalog: &'a TopicCatalog,
    max_rounds: Option<u32>,
    rng: StdRng,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a QuizEngine, catalog: &'a TopicCatalog) -> Self {
        Self {
            engine,
            catalog,
            max_rounds: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Stop after this many evaluated rounds.
    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Use a seeded RNG for topic picking.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Run rounds until the session ends, then print the score.
    ///
    /// `input` and `output` are owned by the session for its whole lifetime.
    /// Provider and I/O errors end the session and are returned.
    pub async fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = SessionSummary::default();
        let mut running = true;
        let mut line = String::new();

        info!(categories = self.catalog.len(), max_rounds = ?self.max_rounds, "session started");

        while running {
            if self.max_rounds.is_some_and(|max| summary.rounds >= max) {
                break;
            }

            let subtopic = pick_topic(self.catalog, &mut self.rng).to_string();
            debug!(%subtopic, "picked subtopic");
            let qa = self.engine.generate_question_and_answer(&subtopic).await?;

            write_out(output, &format!("{}\nYour answer: ", qa.question)).await?;

            line.clear();
            let read = input
                .read_line(&mut line)
                .await
                .context("failed to read answer")?;
            let answer = line.trim_end_matches(['\r', '\n']);

            if read == 0 || is_quit(answer) {
                let prefix = if read == 0 { "\n" } else { "" };
                write_out(output, &format!("{prefix}Quitting...\n")).await?;
                running = false;
                continue;
            }

            let evaluation = self.engine.evaluate_answer(answer, &qa.answer).await?;
            summary.rounds += 1;
            if evaluation.looks_correct() {
                summary.correct += 1;
            }

            write_out(
                output,
                &format!(
                    "Evaluation of your answer: {evaluation}\nCorrect answer: {}\n\n",
                    qa.answer
                ),
            )
            .await?;
        }

        write_out(
            output,
            &format!("Score: {}/{}\n", summary.correct, summary.rounds),
        )
        .await?;
        info!(rounds = summary.rounds, correct = summary.correct, "session ended");

        Ok(summary)
    }
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output
        .write_all(text.as_bytes())
        .await
        .context("failed to write to output")?;
    output.flush().await.context("failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::engine::QuizEngineConfig;
    use crate::error::ProviderError;
    use crate::traits::{GenerateRequest, GenerateResponse, LlmProvider};

    /// Answers question prompts with `qa` and judging prompts with `verdict`.
    struct ScriptedProvider {
        qa: String,
        verdict: String,
        questions: AtomicU32,
        verdicts: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(qa: &str, verdict: &str) -> Arc<Self> {
            Arc::new(Self {
                qa: qa.to_string(),
                verdict: verdict.to_string(),
                questions: AtomicU32::new(0),
                verdicts: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
            let content = if request.prompt.starts_with("Given the correct answer is") {
                self.verdicts.fetch_add(1, Ordering::Relaxed);
                self.verdict.clone()
            } else {
                self.questions.fetch_add(1, Ordering::Relaxed);
                self.qa.clone()
            };
            Ok(GenerateResponse {
                content,
                latency_ms: 0,
            })
        }
    }

    fn map_only() -> TopicCatalog {
        TopicCatalog::from_pairs(&[("arrays", &["map"])]).unwrap()
    }

    async fn run_with_input(
        provider: Arc<ScriptedProvider>,
        input: &str,
        max_rounds: Option<u32>,
    ) -> (Result<SessionSummary>, String) {
        let engine = QuizEngine::new(provider, QuizEngineConfig::default());
        let catalog = map_only();
        let mut session = Session::new(&engine, &catalog)
            .with_seed(3)
            .with_max_rounds(max_rounds);

        let mut reader = input.as_bytes();
        let mut output = Vec::new();
        let result = session.run(&mut reader, &mut output).await;
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn quit_sentinel_is_case_insensitive() {
        assert!(is_quit("quit"));
        assert!(is_quit("QUIT"));
        assert!(is_quit("Quit"));
        assert!(!is_quit("quit now"));
        assert!(!is_quit(" quit"));
        assert!(!is_quit(""));
    }

    #[tokio::test]
    async fn one_round_then_quit() {
        let provider =
            ScriptedProvider::new("What does map do?\n\nIt creates a new array.", "Correct");
        let (result, out) =
            run_with_input(provider.clone(), "creates new array\nquit\n", None).await;

        let summary = result.unwrap();
        assert_eq!(summary, SessionSummary { rounds: 1, correct: 1 });
        assert!(out.starts_with("What does map do?\nYour answer: "));
        assert!(out.contains("Evaluation of your answer: Correct\n"));
        assert!(out.contains("Correct answer: It creates a new array.\n"));
        assert!(out.contains("Quitting...\n"));
        assert!(out.ends_with("Score: 1/1\n"));
        assert_eq!(provider.questions.load(Ordering::Relaxed), 2);
        assert_eq!(provider.verdicts.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn quit_stops_without_reading_further() {
        for sentinel in ["quit", "QUIT", "Quit"] {
            let provider = ScriptedProvider::new("Q?\n\nA.", "Correct");
            let input = format!("{sentinel}\nthis line is never read\n");
            let (result, out) = run_with_input(provider.clone(), &input, None).await;

            assert_eq!(result.unwrap(), SessionSummary::default());
            assert!(out.contains("Quitting..."));
            assert!(!out.contains("Evaluation of your answer"));
            assert_eq!(provider.questions.load(Ordering::Relaxed), 1);
            assert_eq!(provider.verdicts.load(Ordering::Relaxed), 0);
        }
    }

    #[tokio::test]
    async fn end_of_input_ends_session() {
        let provider = ScriptedProvider::new("Q?\n\nA.", "Incorrect");
        let (result, out) = run_with_input(provider, "wrong\n", None).await;

        let summary = result.unwrap();
        assert_eq!(summary, SessionSummary { rounds: 1, correct: 0 });
        assert!(out.contains("Evaluation of your answer: Incorrect\n"));
        assert!(out.contains("\nQuitting...\n"));
        assert!(out.ends_with("Score: 0/1\n"));
    }

    #[tokio::test]
    async fn max_rounds_bounds_the_loop() {
        let provider = ScriptedProvider::new("Q?\n\nA.", "Correct");
        let (result, out) = run_with_input(provider.clone(), "a\nb\nc\nd\n", Some(2)).await;

        assert_eq!(result.unwrap(), SessionSummary { rounds: 2, correct: 2 });
        assert!(!out.contains("Quitting"));
        assert_eq!(provider.questions.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn crlf_input_is_trimmed() {
        let provider = ScriptedProvider::new("Q?\n\nA.", "Correct");
        let (result, _) = run_with_input(provider.clone(), "QUIT\r\n", None).await;
        assert_eq!(result.unwrap().rounds, 0);
        assert_eq!(provider.verdicts.load(Ordering::Relaxed), 0);
    }

    struct DownProvider;

    #[async_trait]
    impl LlmProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        async fn generate(&self, _: &GenerateRequest) -> Result<GenerateResponse> {
            Err(ProviderError::NetworkError("connection refused".into()).into())
        }
    }

    #[tokio::test]
    async fn provider_failure_ends_session() {
        let engine = QuizEngine::new(Arc::new(DownProvider), QuizEngineConfig::default());
        let catalog = map_only();
        let mut session = Session::new(&engine, &catalog);

        let mut reader: &[u8] = b"answer\n";
        let mut output = Vec::new();
        let err = session.run(&mut reader, &mut output).await.unwrap_err();

        assert!(err.downcast_ref::<ProviderError>().is_some());
        assert!(output.is_empty());
    }
}
