//! Subcommand implementations.

pub mod compose;
pub mod doctor;
pub mod personas;
pub mod retrieve;

use personae_config::{AppConfig, ConfigError};
use std::path::Path;

/// Load config from an explicit path, or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(p) => AppConfig::load_from(p),
        None => AppConfig::load(),
    }
}
