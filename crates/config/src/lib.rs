//! Configuration loading, validation, and management for Personae.
//!
//! Loads configuration from `~/.personae/config.toml` (or the path in
//! `PERSONAE_CONFIG`) with environment variable overrides. Validates all
//! settings at load. A missing config file is not an error — the engine is
//! expected to degrade gracefully, so defaults are returned instead.

use personae_core::{PersonaAssets, PersonaRegistry, canonical_name};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.personae/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persona used when a caller names an unknown one
    #[serde(default = "default_persona")]
    pub default_persona: String,

    /// Registered personas: name → asset file pair
    #[serde(default)]
    pub personas: HashMap<String, PersonaPaths>,

    /// Chat assembly settings
    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_persona() -> String {
    "bronn".into()
}

/// Asset file pair for one persona, as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaPaths {
    /// Newline-delimited JSON knowledge base
    pub kb: PathBuf,

    /// Style document (TOML, or free-form prose)
    pub style: PathBuf,
}

/// Settings for chat-completion message assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// How many user/assistant pairs of history to keep per request
    #[serde(default = "default_history_pairs")]
    pub history_pairs: usize,
}

fn default_history_pairs() -> usize {
    8
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_pairs: default_history_pairs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.personae/config.toml).
    ///
    /// Environment overrides:
    /// - `PERSONAE_CONFIG` — alternate config file path
    /// - `PERSONAE_DEFAULT_PERSONA` — overrides `default_persona`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("PERSONAE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::config_dir().join("config.toml"));
        let mut config = Self::load_from(&config_path)?;

        if let Ok(persona) = std::env::var("PERSONAE_DEFAULT_PERSONA") {
            config.default_persona = persona;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".personae")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_persona.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_persona must not be empty".into(),
            ));
        }

        if !self.personas.is_empty() {
            let default_key = canonical_name(&self.default_persona);
            let registered = self
                .personas
                .keys()
                .any(|name| canonical_name(name) == default_key);
            if !registered {
                return Err(ConfigError::ValidationError(format!(
                    "default_persona \"{}\" is not in [personas]",
                    self.default_persona
                )));
            }
        }

        Ok(())
    }

    /// Build the persona registry this config describes.
    pub fn registry(&self) -> PersonaRegistry {
        PersonaRegistry::new(
            self.personas.iter().map(|(name, paths)| {
                (
                    name.clone(),
                    PersonaAssets {
                        kb_path: paths.kb.clone(),
                        style_path: paths.style.clone(),
                    },
                )
            }),
            &self.default_persona,
        )
    }

    /// Generate a default config TOML string (for first-run setup).
    pub fn default_toml() -> String {
        let mut config = Self::default();
        config.personas.insert(
            "bronn".into(),
            PersonaPaths {
                kb: PathBuf::from("assets/bronn_kb.jsonl"),
                style: PathBuf::from("assets/bronn_style.toml"),
            },
        );
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_persona: default_persona(),
            personas: HashMap::new(),
            chat: ChatConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_persona, "bronn");
        assert!(config.personas.is_empty());
        assert_eq!(config.chat.history_pairs, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let mut config = AppConfig::default();
        config.personas.insert(
            "bronn".into(),
            PersonaPaths {
                kb: "bronn_kb.jsonl".into(),
                style: "bronn_style.toml".into(),
            },
        );
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_persona, config.default_persona);
        assert_eq!(parsed.personas.len(), 1);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().default_persona, "bronn");
    }

    #[test]
    fn persona_tables_parse() {
        let toml_str = r#"
default_persona = "Bronn"

[personas.Bronn]
kb = "assets/bronn_kb.jsonl"
style = "assets/bronn_style.toml"

[personas.tyrion]
kb = "assets/tyrion_kb.jsonl"
style = "assets/tyrion_style.toml"

[chat]
history_pairs = 4
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.personas.len(), 2);
        assert_eq!(config.chat.history_pairs, 4);
        assert!(config.validate().is_ok());

        let registry = config.registry();
        assert_eq!(registry.default_persona(), "bronn");
        assert!(registry.contains("TYRION"));
    }

    #[test]
    fn default_persona_must_be_registered() {
        let toml_str = r#"
default_persona = "jon"

[personas.bronn]
kb = "kb.jsonl"
style = "style.toml"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn unparseable_file_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is { not toml").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("default_persona"));
        assert!(toml_str.contains("bronn_kb.jsonl"));
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert!(parsed.validate().is_ok());
    }
}
