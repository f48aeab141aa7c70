//! Style configuration — tone, templates, and retrieval tuning for a persona.
//!
//! A style document is either **structured** (a typed sheet parsed from
//! TOML) or **raw** (the document failed to parse and is carried as
//! free-form style prose). Every reader goes through the accessors on
//! [`StyleConfig`], which handle both variants explicitly: the raw branch
//! yields defaults for every structured key and exposes the original text
//! for the prompt's Style section.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The OOC toggle used when the style document does not configure one.
pub const DEFAULT_OOC_TOGGLE: &str = "[[OOC]]";

/// A loaded style document: structured sheet, or raw prose fallback.
#[derive(Debug, Clone)]
pub enum StyleConfig {
    /// Parsed as a structured key/value document
    Structured(StyleSheet),
    /// Could not be parsed; kept verbatim as free-form style text
    Raw(String),
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::Structured(StyleSheet::default())
    }
}

/// The structured style sheet.
///
/// Every field is optional in the document; missing keys take the defaults
/// below, so a sheet parsed from an empty document behaves identically to a
/// missing style file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// One-line voice description, e.g. "terse, blunt, sardonic"
    pub tone: String,

    /// Persona trait list, rendered into templates
    pub traits: Vec<String>,

    /// Loosely-typed length policy (e.g. `{ max_sentences = 3 }`)
    pub length_policy: Value,

    /// System prompt templates
    pub system: SystemTemplates,

    /// Out-of-character mode settings
    pub ooc_mode: OocMode,

    /// Retrieval tuning
    pub retrieval: RetrievalSettings,

    /// Canned in-character fallback replies
    pub fallbacks: Vec<String>,
}

/// IC/OOC system prompt templates. `None` means "use the built-in default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemTemplates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ic_template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ooc_template: Option<String>,
}

/// Out-of-character mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OocMode {
    /// Prefix that switches a query into OOC narrator mode
    pub toggle: String,
}

impl Default for OocMode {
    fn default() -> Self {
        Self {
            toggle: DEFAULT_OOC_TOGGLE.into(),
        }
    }
}

/// Retrieval tuning: ranking weights plus the ordered tie-breaker rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub ranking: RankingWeights,

    /// Rule names evaluated in order when two entries score equally
    pub tie_breakers: Vec<String>,
}

/// Keyword-overlap weights for the relevance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    #[serde(default = "default_tag_weight")]
    pub tag_weight: u32,

    #[serde(default = "default_alias_weight")]
    pub alias_weight: u32,

    #[serde(default = "default_summary_weight")]
    pub summary_overlap_weight: u32,
}

fn default_tag_weight() -> u32 {
    2
}
fn default_alias_weight() -> u32 {
    2
}
fn default_summary_weight() -> u32 {
    1
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            tag_weight: default_tag_weight(),
            alias_weight: default_alias_weight(),
            summary_overlap_weight: default_summary_weight(),
        }
    }
}

impl StyleConfig {
    /// The structured sheet, when this document parsed as one.
    pub fn sheet(&self) -> Option<&StyleSheet> {
        match self {
            Self::Structured(sheet) => Some(sheet),
            Self::Raw(_) => None,
        }
    }

    /// Raw style prose, when the document degraded to text. Empty or
    /// whitespace-only text is treated as absent.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Structured(_) => None,
            Self::Raw(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
        }
    }

    /// Ranking weights, defaulting to 2/2/1.
    pub fn ranking(&self) -> RankingWeights {
        self.sheet()
            .map(|s| s.retrieval.ranking)
            .unwrap_or_default()
    }

    /// Ordered tie-breaker rule names. Empty when unconfigured.
    pub fn tie_breakers(&self) -> &[String] {
        self.sheet()
            .map(|s| s.retrieval.tie_breakers.as_slice())
            .unwrap_or(&[])
    }

    /// The OOC toggle prefix. An empty configured toggle would make every
    /// query OOC, so it falls back to the default as well.
    pub fn ooc_toggle(&self) -> &str {
        self.sheet()
            .map(|s| s.ooc_mode.toggle.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_OOC_TOGGLE)
    }

    /// The configured in-character template, if any non-blank one exists.
    pub fn ic_template(&self) -> Option<&str> {
        self.sheet()
            .and_then(|s| s.system.ic_template.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    /// The configured out-of-character template, if any non-blank one exists.
    pub fn ooc_template(&self) -> Option<&str> {
        self.sheet()
            .and_then(|s| s.system.ooc_template.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn tone(&self) -> &str {
        self.sheet().map(|s| s.tone.as_str()).unwrap_or("")
    }

    pub fn traits(&self) -> &[String] {
        self.sheet().map(|s| s.traits.as_slice()).unwrap_or(&[])
    }

    /// The loosely-typed length policy; `Null` when unconfigured.
    pub fn length_policy(&self) -> Value {
        self.sheet()
            .map(|s| s.length_policy.clone())
            .unwrap_or(Value::Null)
    }

    pub fn fallbacks(&self) -> &[String] {
        self.sheet().map(|s| s.fallbacks.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sheet_has_default_tuning() {
        let style = StyleConfig::default();
        assert_eq!(style.ranking(), RankingWeights::default());
        assert_eq!(style.ranking().tag_weight, 2);
        assert_eq!(style.ranking().summary_overlap_weight, 1);
        assert_eq!(style.ooc_toggle(), "[[OOC]]");
        assert!(style.tie_breakers().is_empty());
        assert!(style.ic_template().is_none());
        assert!(style.raw_text().is_none());
    }

    #[test]
    fn sheet_parses_from_toml() {
        let doc = r#"
tone = "terse, blunt"
traits = ["sardonic", "streetwise"]
fallbacks = ["Gold first. Talk later."]

[length_policy]
max_sentences = 3

[system]
ic_template = "You are {{character}}."

[ooc_mode]
toggle = "((ooc))"

[retrieval]
tie_breakers = ["higher weight", "book+show over single-canon"]

[retrieval.ranking]
tag_weight = 5
"#;
        let sheet: StyleSheet = toml::from_str(doc).unwrap();
        let style = StyleConfig::Structured(sheet);

        assert_eq!(style.tone(), "terse, blunt");
        assert_eq!(style.traits(), ["sardonic", "streetwise"]);
        assert_eq!(style.ooc_toggle(), "((ooc))");
        assert_eq!(style.ic_template(), Some("You are {{character}}."));
        assert!(style.ooc_template().is_none());
        assert_eq!(style.ranking().tag_weight, 5);
        // unset weights keep their defaults
        assert_eq!(style.ranking().alias_weight, 2);
        assert_eq!(style.tie_breakers().len(), 2);
        assert_eq!(style.fallbacks(), ["Gold first. Talk later."]);
        assert_eq!(style.length_policy()["max_sentences"], 3);
    }

    #[test]
    fn raw_branch_yields_defaults_plus_text() {
        let style = StyleConfig::Raw("Speak like a sellsword.\n".into());
        assert_eq!(style.raw_text(), Some("Speak like a sellsword."));
        assert_eq!(style.ranking(), RankingWeights::default());
        assert_eq!(style.ooc_toggle(), "[[OOC]]");
        assert!(style.traits().is_empty());
        assert!(style.length_policy().is_null());
    }

    #[test]
    fn blank_raw_text_is_absent() {
        let style = StyleConfig::Raw("   \n\t".into());
        assert!(style.raw_text().is_none());
    }

    #[test]
    fn blank_template_and_toggle_fall_back() {
        let sheet = StyleSheet {
            system: SystemTemplates {
                ic_template: Some("   ".into()),
                ooc_template: None,
            },
            ooc_mode: OocMode { toggle: "".into() },
            ..Default::default()
        };
        let style = StyleConfig::Structured(sheet);
        assert!(style.ic_template().is_none());
        assert_eq!(style.ooc_toggle(), "[[OOC]]");
    }
}
