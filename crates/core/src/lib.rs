//! # Personae Core
//!
//! Domain types for the Personae retrieval-and-prompt-synthesis engine.
//! This crate has **zero framework dependencies** — it defines the value
//! objects that every other crate operates on.
//!
//! ## Design Philosophy
//!
//! Everything here is immutable once constructed: knowledge entries and
//! style documents have no write path after loading, which is what makes
//! concurrent prompt composition safe without locking. Fallible parsing
//! lives in `personae-assets`; these types only hold the result.

pub mod context;
pub mod entry;
pub mod message;
pub mod persona;
pub mod style;

// Re-export key types at crate root for ergonomics
pub use context::PromptContext;
pub use entry::{KnowledgeEntry, SourceRef};
pub use message::{ChatMessage, Role};
pub use persona::{PersonaAssets, PersonaRegistry, canonical_name};
pub use style::{OocMode, RankingWeights, StyleConfig, StyleSheet, SystemTemplates};
