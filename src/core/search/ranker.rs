//! Result Ranker
//!
//! Turns a scored candidate set into one response group: drops zero scores,
//! sorts by score descending with a per-entity secondary key ascending,
//! truncates to the resolved limit and derives `has_more` from the
//! repository's exact total.

use super::models::{
    ArtisanRecord, InterventionRecord, ScoredCandidate, SearchEntityType, SearchResult,
    SearchResultsGroup,
};
use super::normalize::normalize;

/// Rank scored candidates into a response group.
///
/// The sort is a stable total order: candidates with equal score and equal
/// secondary key keep their input order.
pub fn rank<T, K>(
    candidates: Vec<ScoredCandidate<T>>,
    entity_type: SearchEntityType,
    limit: usize,
    repository_total: u64,
    secondary_key: K,
) -> SearchResultsGroup<T>
where
    K: Fn(&T) -> String,
{
    let mut scored: Vec<(ScoredCandidate<T>, String)> = candidates
        .into_iter()
        .filter(|candidate| candidate.score.score > 0)
        .map(|candidate| {
            let key = secondary_key(&candidate.record);
            (candidate, key)
        })
        .collect();

    scored.sort_by(|(a, key_a), (b, key_b)| {
        b.score
            .score
            .cmp(&a.score.score)
            .then_with(|| key_a.cmp(key_b))
    });
    scored.truncate(limit);

    let items: Vec<SearchResult<T>> = scored
        .into_iter()
        .map(|(candidate, _)| SearchResult {
            entity_type,
            data: candidate.record,
            score: candidate.score.score,
            matched_fields: candidate.score.matched_fields,
        })
        .collect();

    let has_more = repository_total > items.len() as u64;
    SearchResultsGroup {
        items,
        total: repository_total,
        has_more,
    }
}

/// Secondary tie-break key for artisans: normalized associate code.
pub fn artisan_sort_key(record: &ArtisanRecord) -> String {
    normalize(record.numero_associe.as_deref().unwrap_or(""))
}

/// Secondary tie-break key for interventions: normalized status label.
pub fn intervention_sort_key(record: &InterventionRecord) -> String {
    normalize(
        record
            .status
            .as_ref()
            .and_then(|status| status.label.as_deref())
            .unwrap_or(""),
    )
}
