//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("quizforge.toml", SAMPLE_CONFIG)?;
    write_if_missing(".env.example", SAMPLE_ENV)?;

    println!("\nNext steps:");
    println!("  1. Copy .env.example to .env and set OPENAI_API_KEY");
    println!("  2. Run: quizforge topics");
    println!("  3. Run: quizforge play");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

model = "gpt-3.5-turbo"
language = "JavaScript"
temperature = 0.5
question_max_tokens = 150
verdict_max_tokens = 10
timeout_secs = 60

[openai]
api_key = "${OPENAI_API_KEY}"
# base_url = "https://api.openai.com"
# org_id = "org-..."

# Uncomment to replace the built-in catalog.
# [topics]
# arrays = ["map", "filter", "reduce"]
# strings = ["slice", "split"]
"#;

const SAMPLE_ENV: &str = "OPENAI_API_KEY=\n";
