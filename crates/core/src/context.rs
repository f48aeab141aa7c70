//! Per-call template context.
//!
//! Carries the handful of values a system-prompt template may reference.
//! Built fresh for every compose call and never persisted.

use crate::style::StyleConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The substitution context for `{{ ... }}` template rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptContext {
    /// Persona display name, as the caller passed it
    pub character: String,

    /// Voice description from the style sheet
    pub tone: String,

    /// Persona traits from the style sheet
    pub traits: Vec<String>,

    /// Loosely-typed length policy from the style sheet
    pub length_policy: Value,
}

impl PromptContext {
    /// Assemble the context for one compose call from the loaded style.
    pub fn from_style(character: &str, style: &StyleConfig) -> Self {
        Self {
            character: character.to_string(),
            tone: style.tone().to_string(),
            traits: style.traits().to_vec(),
            length_policy: style.length_policy(),
        }
    }

    /// The context as a JSON mapping for dotted-path template lookup.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StyleConfig, StyleSheet};

    #[test]
    fn context_from_structured_style() {
        let sheet = StyleSheet {
            tone: "dry".into(),
            traits: vec!["blunt".into(), "mercenary".into()],
            ..Default::default()
        };
        let ctx = PromptContext::from_style("Bronn", &StyleConfig::Structured(sheet));

        assert_eq!(ctx.character, "Bronn");
        assert_eq!(ctx.tone, "dry");

        let value = ctx.to_value();
        assert_eq!(value["character"], "Bronn");
        assert_eq!(value["traits"][1], "mercenary");
        assert!(value["length_policy"].is_null());
    }

    #[test]
    fn context_from_raw_style_is_bare() {
        let ctx = PromptContext::from_style("Bronn", &StyleConfig::Raw("prose".into()));
        assert_eq!(ctx.character, "Bronn");
        assert_eq!(ctx.tone, "");
        assert!(ctx.traits.is_empty());
    }
}
