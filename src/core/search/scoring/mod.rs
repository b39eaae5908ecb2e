//! Relevance Scoring
//!
//! Pure scorers computing a 0–100 relevance score and a set of matched
//! field tags for one candidate against one query.
//!
//! Both scorers share the same structure: each field category is scored
//! independently by its strongest matching rule, the candidate score is the
//! running maximum across categories (never a sum, so many weak hits on one
//! conceptual field cannot accumulate), and a small bonus is added when two
//! or more distinct categories corroborate each other.

mod artisan;
mod intervention;

pub use artisan::score_artisan;
pub use intervention::score_intervention;

use super::weights::{FieldWeights, MAX_SCORE, MULTI_FIELD_BONUS};

/// Score one normalized haystack against one normalized query with a
/// category's weight table. Rules are tried strongest-first; the first that
/// fires wins.
pub(crate) fn text_category_score(haystack: &str, query: &str, weights: FieldWeights) -> Option<u8> {
    if haystack.is_empty() || query.is_empty() {
        return None;
    }
    if let Some(weight) = weights.exact {
        if haystack == query {
            return Some(weight);
        }
    }
    if let Some(weight) = weights.prefix {
        if haystack.starts_with(query) {
            return Some(weight);
        }
    }
    if let Some(weight) = weights.contains {
        if haystack.contains(query) {
            return Some(weight);
        }
    }
    None
}

/// Fold a category sub-score into the running maximum.
pub(crate) fn fold_max(current: u8, candidate: u8) -> u8 {
    current.max(candidate)
}

/// Add the cross-category bonus. A single matched category keeps its bare
/// maximum; independent corroborating categories push the score up without
/// breaching the ceiling.
pub(crate) fn apply_multi_field_bonus(score: u8, matched_categories: usize) -> u8 {
    if matched_categories <= 1 {
        return score;
    }
    let bonus = MULTI_FIELD_BONUS.saturating_mul(matched_categories as u8);
    score.saturating_add(bonus).min(MAX_SCORE)
}

/// Join available name parts into one searchable full name.
pub(crate) fn full_name(parts: &[Option<&str>]) -> Option<String> {
    let available: Vec<&str> = parts
        .iter()
        .filter_map(|part| (*part).filter(|s| !s.is_empty()))
        .collect();
    if available.is_empty() {
        None
    } else {
        Some(available.join(" "))
    }
}
