//! # Personae Assets
//!
//! Loading and caching of persona assets: the newline-delimited JSON
//! knowledge base and the style document.
//!
//! Loading is deliberately forgiving. A missing file yields an empty
//! structure, a malformed KB line is skipped, and an unparseable style
//! document degrades to raw prose — nothing in here ever surfaces an error
//! to a caller. The one observable trace is a single warning-level
//! diagnostic the first time assets are checked (see [`LoadDiagnostics`]).

pub mod diagnostics;
pub mod loader;
pub mod store;

pub use diagnostics::LoadDiagnostics;
pub use loader::{load_knowledge_base, load_style};
pub use store::{AssetStore, PersonaBundle};
