//! # Personae Prompt
//!
//! System-prompt synthesis: `{{ dotted.path }}` template rendering, OOC
//! mode detection, knowledge-section assembly, and the [`PromptEngine`]
//! facade that collaborators call.
//!
//! Composition never fails. Every asset problem has already degraded to a
//! default inside `personae-assets`, and the composer itself resolves
//! missing template paths to empty strings — the downstream completion
//! call always receives a valid, non-empty prompt.

pub mod composer;
pub mod engine;
pub mod messages;
pub mod template;

pub use composer::{Mode, compose};
pub use engine::{ComposeOptions, PromptEngine};
pub use messages::build_messages;
pub use template::render;
