//! Single-pass retrieval of the best-matching knowledge entry.

use crate::score::score_entry;
use crate::tiebreak;
use crate::tokenizer::tokenize;
use personae_core::{KnowledgeEntry, StyleConfig};
use std::cmp::Ordering;
use tracing::debug;

/// Find the single best entry for a query, or `None` when nothing matches.
///
/// Tokenizes the query, scores every entry with the style's ranking
/// weights, and keeps the best in one pass. A strictly greater score
/// replaces the incumbent; an equal, strictly positive score consults the
/// style's tie-breaker rules and replaces only on a win. Entries that
/// never score above zero are never returned.
pub fn retrieve<'a>(
    query: &str,
    kb: &'a [KnowledgeEntry],
    style: &StyleConfig,
) -> Option<&'a KnowledgeEntry> {
    let user_tokens = tokenize(query);
    if user_tokens.is_empty() {
        return None;
    }

    let weights = style.ranking();
    let rules = style.tie_breakers();

    let mut best: Option<&KnowledgeEntry> = None;
    let mut best_score = 0u32;

    for entry in kb {
        let score = score_entry(&user_tokens, entry, &weights);
        if score > best_score {
            best = Some(entry);
            best_score = score;
        } else if score == best_score && score > 0 {
            if let Some(incumbent) = best {
                if tiebreak::compare(entry, incumbent, rules) == Ordering::Greater {
                    best = Some(entry);
                }
            }
        }
    }

    if best_score > 0 {
        if let Some(entry) = best {
            debug!(entry = %entry.id, score = best_score, "Knowledge hit");
        }
        best
    } else {
        None
    }
}
