//! Persona registry — maps character names to their asset pair.
//!
//! Lookup canonicalizes the name (trim + lowercase) so "Bronn", " bronn "
//! and "BRONN" all resolve to the same assets. An unknown persona falls
//! back to the designated default persona instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Canonical form of a persona name: trimmed and lower-cased.
///
/// Applied uniformly on registry insert, lookup, and cache keys, so an
/// exact match and a case-insensitive match are the same operation.
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The (knowledge base, style) file pair backing one persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaAssets {
    /// Newline-delimited JSON knowledge base
    pub kb_path: PathBuf,

    /// Style document (structured TOML or free-form prose)
    pub style_path: PathBuf,
}

/// Registry of known personas plus the default used for unknown names.
#[derive(Debug, Clone, Default)]
pub struct PersonaRegistry {
    personas: HashMap<String, PersonaAssets>,
    default_persona: String,
}

impl PersonaRegistry {
    /// Build a registry. Keys are canonicalized on insert; if two names
    /// collide after canonicalization, the later one wins.
    pub fn new(
        personas: impl IntoIterator<Item = (String, PersonaAssets)>,
        default_persona: &str,
    ) -> Self {
        let personas = personas
            .into_iter()
            .map(|(name, assets)| (canonical_name(&name), assets))
            .collect();
        Self {
            personas,
            default_persona: canonical_name(default_persona),
        }
    }

    /// Canonical name of the default persona.
    pub fn default_persona(&self) -> &str {
        &self.default_persona
    }

    /// Whether a persona is registered under this (non-canonical) name.
    pub fn contains(&self, name: &str) -> bool {
        self.personas.contains_key(&canonical_name(name))
    }

    /// Resolve a persona name to its assets, falling back to the default
    /// persona for unknown names. `None` only when even the default is
    /// unregistered — callers degrade to empty assets in that case.
    pub fn resolve(&self, name: &str) -> Option<&PersonaAssets> {
        self.personas
            .get(&canonical_name(name))
            .or_else(|| self.personas.get(&self.default_persona))
    }

    /// The canonical name a lookup actually lands on (for cache keying):
    /// the requested persona when registered, otherwise the default.
    pub fn resolve_name(&self, name: &str) -> String {
        let canonical = canonical_name(name);
        if self.personas.contains_key(&canonical) {
            canonical
        } else {
            self.default_persona.clone()
        }
    }

    /// Registered personas in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonaAssets)> {
        self.personas.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
