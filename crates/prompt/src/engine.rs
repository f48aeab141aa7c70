//! The engine facade — what collaborators actually call.
//!
//! Wraps persona resolution, asset loading/caching, retrieval, and
//! composition behind a handful of infallible methods. A chat backend
//! holds one `PromptEngine` for the process and calls it per request.

use crate::composer::{self, Mode, compose};
use crate::messages::build_messages;
use personae_assets::AssetStore;
use personae_core::{ChatMessage, KnowledgeEntry, PersonaRegistry};
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

/// Reply used when a style document offers no fallback lines.
const DEFAULT_FALLBACK: &str = "I have nothing to say about that.";

/// Per-call knobs. `k` is accepted for forward compatibility with a top-k
/// retrieval mode; the current engine always selects a single best entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions {
    /// Requested retrieval depth; ignored beyond validation for now
    pub k: Option<usize>,
}

/// Persona-aware prompt synthesis engine.
pub struct PromptEngine {
    store: AssetStore,
    history_pairs: usize,
}

impl PromptEngine {
    /// Create an engine over a persona registry.
    pub fn new(registry: PersonaRegistry) -> Self {
        Self {
            store: AssetStore::new(registry),
            history_pairs: 8,
        }
    }

    /// Override how many history pairs `chat_messages` keeps (default 8).
    pub fn with_history_pairs(mut self, pairs: usize) -> Self {
        self.history_pairs = pairs;
        self
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Compose the system prompt for one call. Never fails; unknown
    /// personas fall back to the default persona's assets, and missing
    /// assets degrade to the built-in templates.
    pub fn compose(&self, character: &str, user_query: &str) -> String {
        self.compose_with_options(character, user_query, &ComposeOptions::default())
    }

    /// [`compose`](Self::compose) with explicit options.
    pub fn compose_with_options(
        &self,
        character: &str,
        user_query: &str,
        options: &ComposeOptions,
    ) -> String {
        if let Some(k) = options.k {
            if k == 0 {
                warn!("Ignoring retrieval depth k=0; must be at least 1");
            } else if k > 1 {
                debug!(k, "Top-k retrieval not implemented; selecting single best entry");
            }
        }

        let bundle = self.store.bundle_for(character);
        compose(character, user_query, &bundle.kb, &bundle.style)
    }

    /// The knowledge entry retrieval would ground this query on, if any.
    /// The OOC toggle is stripped before matching, exactly as in
    /// [`compose`](Self::compose).
    pub fn best_entry(&self, character: &str, user_query: &str) -> Option<KnowledgeEntry> {
        let bundle = self.store.bundle_for(character);
        let (_, cleaned) = composer::detect_mode(user_query, bundle.style.ooc_toggle());
        personae_retrieval::retrieve(&cleaned, &bundle.kb, &bundle.style).cloned()
    }

    /// Full message list for a completion request: composed system prompt,
    /// bounded history, then the user's utterance verbatim.
    pub fn chat_messages(
        &self,
        character: &str,
        user_query: &str,
        history: &[ChatMessage],
    ) -> Vec<ChatMessage> {
        let system_prompt = self.compose(character, user_query);
        build_messages(&system_prompt, history, user_query, self.history_pairs)
    }

    /// A canned in-character reply for when the downstream completion call
    /// fails. Picks randomly from the style's `fallbacks`; a neutral
    /// built-in line covers styles that configure none.
    pub fn fallback_line(&self, character: &str) -> String {
        let bundle = self.store.bundle_for(character);
        bundle
            .style
            .fallbacks()
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_FALLBACK.to_string())
    }

    /// Whether this call would run in OOC narrator mode.
    pub fn mode_for(&self, character: &str, user_query: &str) -> Mode {
        let bundle = self.store.bundle_for(character);
        composer::detect_mode(user_query, bundle.style.ooc_toggle()).0
    }
}
