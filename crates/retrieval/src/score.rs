//! Relevance scoring — weighted keyword overlap between query and entry.

use crate::tokenizer::tokenize;
use personae_core::{KnowledgeEntry, RankingWeights};

/// Only this many leading summary tokens participate in scoring; a long
/// summary must earn its match in the opening words.
const SUMMARY_TOKEN_LIMIT: usize = 15;

/// Score one entry against the user's query tokens.
///
/// Every tag token present in the query adds `tag_weight`, every alias
/// token adds `alias_weight`, and each of the first fifteen summary tokens
/// present in the query adds `summary_overlap_weight`. Pure and
/// deterministic for a given input and weight configuration.
pub fn score_entry(user_tokens: &[String], entry: &KnowledgeEntry, weights: &RankingWeights) -> u32 {
    let contains = |tok: &String| user_tokens.contains(tok);
    let mut score = 0u32;

    for tag in &entry.tags {
        for tok in tokenize(tag) {
            if contains(&tok) {
                score += weights.tag_weight;
            }
        }
    }

    for alias in &entry.aliases {
        for tok in tokenize(alias) {
            if contains(&tok) {
                score += weights.alias_weight;
            }
        }
    }

    for tok in tokenize(&entry.summary).into_iter().take(SUMMARY_TOKEN_LIMIT) {
        if contains(&tok) {
            score += weights.summary_overlap_weight;
        }
    }

    score
}
