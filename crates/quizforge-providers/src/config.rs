//! Configuration loading and the provider factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::engine::{
    QuizEngineConfig, DEFAULT_LANGUAGE, DEFAULT_MODEL, DEFAULT_QUESTION_MAX_TOKENS,
    DEFAULT_TEMPERATURE, DEFAULT_VERDICT_MAX_TOKENS,
};
use quizforge_core::traits::LlmProvider;
use quizforge_core::TopicCatalog;

use crate::openai::{OpenAiProvider, DEFAULT_TIMEOUT_SECS};

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "quizforge.toml";
/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Connection settings for the chat-completion service.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("OpenAiConfig")
            .field("api_key", &key)
            .field("base_url", &self.base_url)
            .field("org_id", &self.org_id)
            .finish()
    }
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Model used for both question generation and judging.
    #[serde(default = "default_model")]
    pub model: String,
    /// Programming language the questions are about.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_question_max_tokens")]
    pub question_max_tokens: u32,
    #[serde(default = "default_verdict_max_tokens")]
    pub verdict_max_tokens: u32,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Replaces the built-in topic catalog when present.
    #[serde(default)]
    pub topics: Option<TopicCatalog>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_question_max_tokens() -> u32 {
    DEFAULT_QUESTION_MAX_TOKENS
}
fn default_verdict_max_tokens() -> u32 {
    DEFAULT_VERDICT_MAX_TOKENS
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            model: default_model(),
            language: default_language(),
            temperature: default_temperature(),
            question_max_tokens: default_question_max_tokens(),
            verdict_max_tokens: default_verdict_max_tokens(),
            timeout_secs: default_timeout(),
            topics: None,
        }
    }
}

impl QuizforgeConfig {
    /// Check value ranges. The API key is not checked; a missing key
    /// surfaces on the first request.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=2.0).contains(&self.temperature),
            "temperature must be between 0.0 and 2.0"
        );
        anyhow::ensure!(
            self.question_max_tokens >= 1 && self.verdict_max_tokens >= 1,
            "max token limits must be at least 1"
        );
        anyhow::ensure!(self.timeout_secs >= 1, "timeout_secs must be at least 1");
        anyhow::ensure!(!self.model.trim().is_empty(), "model must not be empty");
        Ok(())
    }

    pub fn engine_config(&self) -> QuizEngineConfig {
        QuizEngineConfig {
            model: self.model.clone(),
            language: self.language.clone(),
            temperature: self.temperature,
            question_max_tokens: self.question_max_tokens,
            verdict_max_tokens: self.verdict_max_tokens,
        }
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> TopicCatalog {
        self.topics.clone().unwrap_or_default()
    }
}

/// Load `.env` from the working directory, if there is one.
///
/// Variables already present in the environment are not overridden.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("ignoring unreadable .env: {e}"),
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + len];
        let value = std::env::var(var_name).unwrap_or_default();
        result.replace_range(start..start + len + 1, &value);
        search_from = start + value.len();
    }
    result
}

/// Apply `${VAR}` expansion and environment overrides.
fn apply_env(config: &mut QuizforgeConfig, lookup: impl Fn(&str) -> Option<String>) {
    config.openai.api_key = resolve_env_vars(&config.openai.api_key);
    config.openai.base_url = config.openai.base_url.as_deref().map(resolve_env_vars);
    config.openai.org_id = config.openai.org_id.as_deref().map(resolve_env_vars);

    if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
        config.openai.api_key = key;
    }
}

/// Load config from an explicit path, or search the well-known paths:
///
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable override: `OPENAI_API_KEY`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match &config_path {
        Some(path) => parse_config_file(path)?,
        None => QuizforgeConfig::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok());
    config.validate()?;

    tracing::debug!(path = ?config_path, config = ?config, "configuration loaded");
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<QuizforgeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<QuizforgeConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

/// Create the chat-completion provider described by the configuration.
pub fn create_provider(config: &QuizforgeConfig) -> Result<Box<dyn LlmProvider>> {
    let provider = OpenAiProvider::new(
        &config.openai.api_key,
        config.openai.base_url.clone(),
        config.openai.org_id.clone(),
        config.timeout_secs,
    )?;
    Ok(Box::new(provider))
}
