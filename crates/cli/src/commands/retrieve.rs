//! `personae retrieve` — Show the knowledge entry a query would ground on.

use personae_prompt::PromptEngine;
use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    character: &str,
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let engine = PromptEngine::new(config.registry());

    match engine.best_entry(character, query) {
        Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
        None => println!("No knowledge entry matched."),
    }

    Ok(())
}
