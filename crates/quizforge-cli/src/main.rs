//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "LLM-backed programming quiz trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer generated quiz questions until you type "quit"
    Play {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Model override (e.g. "gpt-4.1-mini")
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature override
        #[arg(long)]
        temperature: Option<f64>,

        /// Only ask about this category
        #[arg(long)]
        category: Option<String>,

        /// Stop after this many answered rounds
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// List the topic catalog
    Topics {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and .env example
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizforge=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    quizforge_providers::load_dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            config,
            model,
            temperature,
            category,
            rounds,
        } => commands::play::execute(config, model, temperature, category, rounds).await,
        Commands::Topics { config } => commands::topics::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
