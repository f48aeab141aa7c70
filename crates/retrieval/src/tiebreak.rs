//! Tie-breaking between equally-scored knowledge entries.
//!
//! Rules are named in the style document and evaluated in the order they
//! appear; the first rule with an opinion decides. Unrecognized rule names
//! are no-ops, so a style file can carry rules this build doesn't know
//! about without breaking retrieval.

use personae_core::KnowledgeEntry;
use std::cmp::Ordering;

/// Rule: the entry with the higher editorial weight wins.
pub const RULE_HIGHER_WEIGHT: &str = "higher weight";

/// Rule: an entry attested by both book and show outranks one that isn't.
pub const RULE_DUAL_CANON: &str = "book+show over single-canon";

/// Compare candidate `a` against incumbent `b` under the given rules.
///
/// `Ordering::Greater` means the candidate wins; `Ordering::Less` means it
/// loses; `Ordering::Equal` means no rule decided — the caller keeps the
/// incumbent, so ties favor the entry seen first in the scan.
pub fn compare(a: &KnowledgeEntry, b: &KnowledgeEntry, rules: &[String]) -> Ordering {
    for rule in rules {
        let decision = match rule.trim().to_lowercase().as_str() {
            RULE_HIGHER_WEIGHT => a.weight.cmp(&b.weight),
            RULE_DUAL_CANON => a.has_dual_canon().cmp(&b.has_dual_canon()),
            _ => Ordering::Equal,
        };
        if decision != Ordering::Equal {
            return decision;
        }
    }
    Ordering::Equal
}
