//! Search Orchestrator
//!
//! Resolves per-type result limits from the classified context, fans the
//! artisan and intervention searches out concurrently, sequences the
//! active-count enrichment after artisan ranking, and assembles the grouped
//! response.
//!
//! Every call is stateless: no cache, no retries, no internal timeouts.
//! A repository failure in either branch aborts the whole call; only the
//! count enrichment is allowed to degrade to zeroes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::context::detect_search_context;
use super::error::Result;
use super::models::{
    GroupedSearchResults, ScoredCandidate, SearchContext, SearchEntityType, SearchOptions,
    SearchResultsGroup,
};
use super::ranker::{artisan_sort_key, intervention_sort_key, rank};
use super::repository::{artisan_candidate_query, intervention_candidate_query, SearchRepository};
use super::scoring::{score_artisan, score_intervention};
use crate::config::SearchConfig;

/// Queries shorter than this (after trimming) short-circuit to an empty,
/// well-formed response without touching the repository.
pub const MIN_QUERY_LEN: usize = 2;

/// Limit floor applied when the context points at the entity type.
const ARTISAN_CONTEXT_FLOOR: usize = 5;
const INTERVENTION_CONTEXT_FLOOR: usize = 8;

/// Limit cap applied to the entity type the context points away from.
const ARTISAN_OFF_CONTEXT_CAP: usize = 3;
const INTERVENTION_OFF_CONTEXT_CAP: usize = 5;

/// Universal search over artisans and interventions.
pub struct UniversalSearchEngine {
    repository: Arc<dyn SearchRepository>,
    config: SearchConfig,
}

impl UniversalSearchEngine {
    /// Create an engine over a repository with the given defaults.
    pub fn new(repository: Arc<dyn SearchRepository>, config: SearchConfig) -> Self {
        Self { repository, config }
    }

    /// Create an engine with default limits.
    pub fn with_defaults(repository: Arc<dyn SearchRepository>) -> Self {
        Self::new(repository, SearchConfig::default())
    }

    /// Run one universal search call.
    pub async fn universal_search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<GroupedSearchResults> {
        let trimmed = query.trim();
        let context = detect_search_context(trimmed);

        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Ok(GroupedSearchResults {
                artisans: SearchResultsGroup::empty(),
                interventions: SearchResultsGroup::empty(),
                context,
                search_time_ms: 0,
            });
        }

        let (artisan_limit, intervention_limit) =
            resolve_limits(context, options, &self.config);

        let start = Instant::now();
        let (artisans, interventions) = tokio::try_join!(
            self.search_artisans(trimmed, artisan_limit),
            self.search_interventions(trimmed, intervention_limit),
        )?;
        let search_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            query = trimmed,
            ?context,
            artisan_hits = artisans.items.len(),
            intervention_hits = interventions.items.len(),
            search_time_ms,
            "universal search completed"
        );

        Ok(GroupedSearchResults {
            artisans,
            interventions,
            context,
            search_time_ms,
        })
    }

    /// Fetch, score and rank artisan candidates, then annotate the final
    /// items with their active-intervention counts.
    async fn search_artisans(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<SearchResultsGroup<crate::core::search::models::ArtisanRecord>> {
        let candidate_query = artisan_candidate_query(query, limit);
        let candidates = self.repository.find_artisan_candidates(&candidate_query).await?;

        let scored: Vec<ScoredCandidate<_>> = candidates
            .rows
            .into_iter()
            .map(|record| {
                let score = score_artisan(&record, query);
                ScoredCandidate { record, score }
            })
            .collect();

        let mut group = rank(
            scored,
            SearchEntityType::Artisan,
            limit,
            candidates.total,
            artisan_sort_key,
        );

        // Enrichment runs strictly after ranking and truncation: it needs
        // the final id set, and it must not affect ordering.
        let ids: Vec<String> = group.items.iter().map(|item| item.data.id.clone()).collect();
        let counts = if ids.is_empty() {
            HashMap::new()
        } else {
            match self.repository.active_intervention_counts(&ids).await {
                Ok(counts) => counts,
                Err(e) => {
                    warn!(error = %e, "unable to fetch active intervention counts");
                    HashMap::new()
                }
            }
        };
        for item in &mut group.items {
            item.data.active_intervention_count =
                Some(counts.get(&item.data.id).copied().unwrap_or(0));
        }

        Ok(group)
    }

    /// Fetch, score and rank intervention candidates.
    async fn search_interventions(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<SearchResultsGroup<crate::core::search::models::InterventionRecord>> {
        let candidate_query = intervention_candidate_query(query, limit);
        let candidates = self
            .repository
            .find_intervention_candidates(&candidate_query)
            .await?;

        let scored: Vec<ScoredCandidate<_>> = candidates
            .rows
            .into_iter()
            .map(|record| {
                let score = score_intervention(&record, query);
                ScoredCandidate { record, score }
            })
            .collect();

        Ok(rank(
            scored,
            SearchEntityType::Intervention,
            limit,
            candidates.total,
            intervention_sort_key,
        ))
    }
}

/// Resolve per-type limits: explicit caller limits win outright; otherwise
/// the context raises the targeted type's limit and caps the other one.
pub(crate) fn resolve_limits(
    context: SearchContext,
    options: SearchOptions,
    config: &SearchConfig,
) -> (usize, usize) {
    let artisan_limit = match options.artisan_limit {
        Some(limit) => limit,
        None => {
            let base = if context == SearchContext::Artisan {
                config.artisan_limit.max(ARTISAN_CONTEXT_FLOOR)
            } else {
                config.artisan_limit
            };
            if context == SearchContext::Intervention {
                base.min(ARTISAN_OFF_CONTEXT_CAP)
            } else {
                base
            }
        }
    };

    let intervention_limit = match options.intervention_limit {
        Some(limit) => limit,
        None => {
            let base = if context == SearchContext::Intervention {
                config.intervention_limit.max(INTERVENTION_CONTEXT_FLOOR)
            } else {
                config.intervention_limit
            };
            if context == SearchContext::Artisan {
                base.min(INTERVENTION_OFF_CONTEXT_CAP)
            } else {
                base
            }
        }
    };

    (artisan_limit, intervention_limit)
}
