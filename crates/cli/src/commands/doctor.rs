//! `personae doctor` — Diagnose config and persona asset health.

use personae_assets::{load_knowledge_base, load_style};
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Personae Doctor — Asset Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue found. See above for details.");
            return Ok(());
        }
    };

    let registry = config.registry();
    if registry.is_empty() {
        println!("  ⚠️  No personas registered — every compose call will degrade to built-ins");
        issues += 1;
    } else if !registry.contains(registry.default_persona()) {
        println!(
            "  ❌ Default persona \"{}\" is not registered",
            registry.default_persona()
        );
        issues += 1;
    } else {
        println!("  ✅ Default persona registered ({})", registry.default_persona());
    }

    let mut personas: Vec<_> = registry.iter().collect();
    personas.sort_by(|a, b| a.0.cmp(b.0));

    for (name, assets) in personas {
        println!("\n  Persona: {name}");

        if assets.kb_path.exists() {
            let entries = load_knowledge_base(&assets.kb_path);
            if entries.is_empty() {
                println!("    ⚠️  KB present but no entries parsed: {}", assets.kb_path.display());
                issues += 1;
            } else {
                println!("    ✅ KB: {} entries", entries.len());
            }
        } else {
            println!("    ⚠️  KB missing: {}", assets.kb_path.display());
            issues += 1;
        }

        if assets.style_path.exists() {
            let style = load_style(&assets.style_path);
            if style.sheet().is_some() {
                println!("    ✅ Style: structured sheet");
            } else {
                println!("    ⚠️  Style: unstructured, degraded to raw prose");
            }
        } else {
            println!("    ⚠️  Style missing: {} (built-in defaults apply)", assets.style_path.display());
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
