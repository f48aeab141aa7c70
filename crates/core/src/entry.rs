//! Knowledge-base entry — the unit of persona grounding.
//!
//! Entries are curated facts/snippets about a character, loaded from a
//! newline-delimited JSON file. Construction is best-effort: a record may
//! carry any subset of the known fields, and anything missing or mistyped
//! falls back to an empty default. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a knowledge entry came from (book page, wiki article, …).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Human-readable source title
    #[serde(default)]
    pub title: String,

    /// Source URL, if any
    #[serde(default)]
    pub url: String,
}

impl SourceRef {
    /// Render as `title (url)`, omitting whichever half is absent.
    pub fn display_line(&self) -> String {
        format!("{} ({})", self.title, self.url)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.url.is_empty()
    }
}

/// A single curated knowledge-base record for one persona.
///
/// Immutable once loaded; identity is `id`. Tags and aliases are stored
/// lower-cased so that all downstream comparisons are case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Stable identifier of this entry
    pub id: String,

    /// Topic tags, lower-cased
    #[serde(default)]
    pub tags: Vec<String>,

    /// Alternate names/phrases, lower-cased
    #[serde(default)]
    pub aliases: Vec<String>,

    /// One- or two-sentence factual summary
    #[serde(default)]
    pub summary: String,

    /// Suggested in-character reply seed
    #[serde(default)]
    pub ic_reply: String,

    /// Story era this entry belongs to
    #[serde(default)]
    pub era: String,

    /// Which canons attest this entry (e.g. "book", "show")
    #[serde(default)]
    pub canon: Vec<String>,

    /// Out-of-character notes for narrator mode
    #[serde(default)]
    pub ooc_notes: String,

    /// Editorial weight used only for tie-breaking; never negative
    #[serde(default)]
    pub weight: i64,

    /// Provenance, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,

    /// Entities mentioned, in document order
    #[serde(default)]
    pub entities: Vec<String>,
}

impl KnowledgeEntry {
    /// Build an entry from a parsed JSON value.
    ///
    /// Returns `None` only when the value is not an object; every field is
    /// otherwise extracted best-effort with the defaults above. A
    /// non-integer `weight` is cast where possible and clamped to ≥ 0.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            id: string_field(obj.get("id")),
            tags: lowered_list(obj.get("tags")),
            aliases: lowered_list(obj.get("aliases")),
            summary: string_field(obj.get("summary")).trim().to_string(),
            ic_reply: string_field(obj.get("ic_reply")).trim().to_string(),
            era: string_field(obj.get("era")),
            canon: string_list(obj.get("canon")),
            ooc_notes: string_field(obj.get("ooc_notes")),
            weight: weight_field(obj.get("weight")),
            source: source_field(obj.get("source")),
            entities: string_list(obj.get("entities")),
        })
    }

    /// Whether this entry is attested by both the book and the show canon.
    pub fn has_dual_canon(&self) -> bool {
        self.canon.iter().any(|c| c == "book") && self.canon.iter().any(|c| c == "show")
    }
}

/// Coerce a JSON scalar to a string. Strings pass through unquoted; numbers
/// and booleans take their display form; everything else is empty.
fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Extract a list of strings, coercing scalar elements and skipping the rest.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| string_field(Some(v)))
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn lowered_list(value: Option<&Value>) -> Vec<String> {
    string_list(value)
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect()
}

/// Best-effort integer cast for `weight`, clamped to ≥ 0.
fn weight_field(value: Option<&Value>) -> i64 {
    let raw = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    raw.max(0)
}

fn source_field(value: Option<&Value>) -> Option<SourceRef> {
    let obj = value?.as_object()?;
    let source = SourceRef {
        title: string_field(obj.get("title")),
        url: string_field(obj.get("url")),
    };
    if source.is_empty() { None } else { Some(source) }
}
