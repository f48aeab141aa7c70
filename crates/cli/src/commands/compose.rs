//! `personae compose` — Build the system prompt for a character and query.

use personae_prompt::{ComposeOptions, PromptEngine};
use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    character: &str,
    query: &str,
    k: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let engine = PromptEngine::new(config.registry()).with_history_pairs(config.chat.history_pairs);

    let prompt = engine.compose_with_options(character, query, &ComposeOptions { k });
    println!("{prompt}");

    Ok(())
}
