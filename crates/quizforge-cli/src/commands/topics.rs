//! The `quizforge topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_providers::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = config.catalog();

    let mut table = Table::new();
    table.set_header(vec!["Category", "Subtopics"]);
    for (category, subtopics) in catalog.iter() {
        table.add_row(vec![Cell::new(category), Cell::new(subtopics.join(", "))]);
    }

    println!("{} quiz topics:\n{table}", config.language);
    Ok(())
}
