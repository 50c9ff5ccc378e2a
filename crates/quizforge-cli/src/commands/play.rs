//! The `quizforge play` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;

use quizforge_core::traits::LlmProvider;
use quizforge_core::{ProviderError, QuizEngine, Session};
use quizforge_providers::config::API_KEY_ENV;
use quizforge_providers::{create_provider, load_config_from};

pub async fn execute(
    config_path: Option<PathBuf>,
    model: Option<String>,
    temperature: Option<f64>,
    category: Option<String>,
    rounds: Option<u32>,
) -> Result<()> {
    anyhow::ensure!(rounds != Some(0), "rounds must be at least 1");

    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(temperature) = temperature {
        config.temperature = temperature;
    }
    config.validate()?;

    let catalog = match &category {
        Some(name) => config.catalog().restrict(name)?,
        None => config.catalog(),
    };

    let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(&config)?);
    let engine = QuizEngine::new(provider, config.engine_config());

    let mut input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    let result = Session::new(&engine, &catalog)
        .with_max_rounds(rounds)
        .run(&mut input, &mut output)
        .await;

    match result {
        Ok(summary) => {
            tracing::info!(rounds = summary.rounds, correct = summary.correct, "done");
            Ok(())
        }
        Err(e)
            if e
                .downcast_ref::<ProviderError>()
                .is_some_and(ProviderError::is_configuration) =>
        {
            Err(e.context(format!(
                "check {API_KEY_ENV} and the model '{}'",
                config.model
            )))
        }
        Err(e) => Err(e),
    }
}
