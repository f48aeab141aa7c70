//! Asset file loaders.
//!
//! Both loaders are total: every failure path maps to an empty or degraded
//! value, never to an error. The knowledge base and style for a persona are
//! loaded once and shared read-only afterwards.

use personae_core::{KnowledgeEntry, StyleConfig, StyleSheet};
use std::path::Path;
use tracing::debug;

/// Load a knowledge base from a newline-delimited JSON file.
///
/// Each line is parsed independently; a line that is not a JSON object is
/// skipped. A missing or unreadable file yields an empty knowledge base.
pub fn load_knowledge_base(path: &Path) -> Vec<KnowledgeEntry> {
    let Some(content) = read_file_safe(path) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(value) => match KnowledgeEntry::from_json(&value) {
                Some(entry) => entries.push(entry),
                None => {
                    debug!(file = %path.display(), line = lineno + 1, "KB line is not an object, skipped");
                }
            },
            Err(_) => {
                debug!(file = %path.display(), line = lineno + 1, "KB line failed to parse, skipped");
            }
        }
    }

    debug!(file = %path.display(), entries = entries.len(), "Knowledge base loaded");
    entries
}

/// Load a style document.
///
/// A missing file yields an empty structured sheet. A file that does not
/// parse as TOML is kept verbatim as raw style prose.
pub fn load_style(path: &Path) -> StyleConfig {
    let Some(content) = read_file_safe(path) else {
        return StyleConfig::default();
    };

    match toml::from_str::<StyleSheet>(&content) {
        Ok(sheet) => StyleConfig::Structured(sheet),
        Err(_) => {
            debug!(file = %path.display(), "Style document is not structured, keeping raw text");
            StyleConfig::Raw(content)
        }
    }
}

/// Safely read a file, returning None on any error.
fn read_file_safe(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}
