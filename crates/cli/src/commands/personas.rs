//! `personae personas` — List registered personas and their asset paths.

use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let registry = config.registry();

    println!("🎭 Personae Registry");
    println!("===================");
    println!("  Default persona: {}", registry.default_persona());

    if registry.is_empty() {
        println!("\n  ⚠️  No personas registered — add [personas.<name>] tables to the config");
        return Ok(());
    }

    let mut entries: Vec<_> = registry.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    println!();
    for (name, assets) in entries {
        println!("  {name}");
        println!("    kb:    {}", assets.kb_path.display());
        println!("    style: {}", assets.style_path.display());
    }

    Ok(())
}
