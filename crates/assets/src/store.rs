//! Per-persona asset cache.
//!
//! Assets are loaded on first request for a persona and shared as an
//! immutable [`PersonaBundle`] afterwards. Concurrent callers either share
//! an already-loaded bundle or race to insert one; both loads produce the
//! same immutable value, so the race is benign.

use crate::diagnostics::LoadDiagnostics;
use crate::loader::{load_knowledge_base, load_style};
use personae_core::{KnowledgeEntry, PersonaRegistry, StyleConfig};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// The loaded, immutable asset pair for one persona.
#[derive(Debug, Default)]
pub struct PersonaBundle {
    /// Knowledge base, read-only after load
    pub kb: Vec<KnowledgeEntry>,

    /// Style document, read-only after load
    pub style: StyleConfig,
}

/// Loads and caches persona bundles against a registry.
#[derive(Debug)]
pub struct AssetStore {
    registry: PersonaRegistry,
    cache: RwLock<HashMap<String, Arc<PersonaBundle>>>,
    diagnostics: LoadDiagnostics,
}

impl AssetStore {
    pub fn new(registry: PersonaRegistry) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
            diagnostics: LoadDiagnostics::new(),
        }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &LoadDiagnostics {
        &self.diagnostics
    }

    /// Get the asset bundle for a persona, loading it on first use.
    ///
    /// Unknown personas resolve to the default persona's bundle. When even
    /// the default is unregistered, an empty bundle is returned — the
    /// composer degrades to its built-in templates from there.
    pub fn bundle_for(&self, character: &str) -> Arc<PersonaBundle> {
        let Some(assets) = self.registry.resolve(character) else {
            return Arc::new(PersonaBundle::default());
        };
        let cache_key = self.registry.resolve_name(character);

        let read = self.cache.read().unwrap_or_else(|e| e.into_inner());
        if let Some(bundle) = read.get(&cache_key) {
            return Arc::clone(bundle);
        }
        drop(read);

        self.diagnostics
            .report_once(&assets.kb_path, &assets.style_path);

        let bundle = Arc::new(PersonaBundle {
            kb: load_knowledge_base(&assets.kb_path),
            style: load_style(&assets.style_path),
        });
        debug!(persona = %cache_key, entries = bundle.kb.len(), "Persona bundle loaded");

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(cache.entry(cache_key).or_insert(bundle))
    }
}
