//! Orchestrator behavior: short-circuit, fan-out, fail-fast, ranking,
//! truncation and count enrichment, all against the repository double.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::search::models::{SearchContext, SearchEntityType, SearchOptions};
use crate::core::search::UniversalSearchEngine;
use crate::tests::common::fixtures::{artisan, intervention};
use crate::tests::mocks::InMemoryRepository;

fn engine(repository: InMemoryRepository) -> UniversalSearchEngine {
    UniversalSearchEngine::with_defaults(Arc::new(repository))
}

#[tokio::test]
async fn test_short_query_short_circuits() {
    let repository = InMemoryRepository::new().with_artisans(vec![artisan("a1", "AB12")]);
    let engine = UniversalSearchEngine::with_defaults(Arc::new(repository));

    let results = engine
        .universal_search("  x ", SearchOptions::default())
        .await
        .unwrap();

    assert!(results.artisans.items.is_empty());
    assert!(results.interventions.items.is_empty());
    assert_eq!(results.artisans.total, 0);
    assert_eq!(results.search_time_ms, 0);
}

#[tokio::test]
async fn test_empty_query_reports_mixed_context() {
    let results = engine(InMemoryRepository::new())
        .universal_search("", SearchOptions::default())
        .await
        .unwrap();
    assert_eq!(results.context, SearchContext::Mixed);
}

#[tokio::test]
async fn test_matching_candidates_are_scored_and_grouped() {
    let mut match_hit = artisan("a1", "DP42");
    match_hit.plain_nom = Some("Jean Dupont".to_string());
    let miss = artisan("a2", "ME07");

    let repository = InMemoryRepository::new()
        .with_artisans(vec![miss, match_hit])
        .with_counts(HashMap::from([("a1".to_string(), 4)]));

    let results = engine(repository)
        .universal_search("dupont", SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.artisans.items.len(), 1);
    let hit = &results.artisans.items[0];
    assert_eq!(hit.entity_type, SearchEntityType::Artisan);
    assert_eq!(hit.data.id, "a1");
    assert!(hit.score > 0);
    assert!(!hit.matched_fields.is_empty());
    assert_eq!(hit.data.active_intervention_count, Some(4));
}

#[tokio::test]
async fn test_unmatched_artisan_gets_zero_count_annotation() {
    let mut hit = artisan("a1", "DP42");
    hit.plain_nom = Some("Jean Dupont".to_string());

    let repository = InMemoryRepository::new().with_artisans(vec![hit]);
    let results = engine(repository)
        .universal_search("dupont", SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(
        results.artisans.items[0].data.active_intervention_count,
        Some(0)
    );
}

#[tokio::test]
async fn test_repository_failure_aborts_whole_call() {
    let mut repository = InMemoryRepository::new();
    repository.fail_interventions = true;

    let result = engine(repository)
        .universal_search("dupont", SearchOptions::default())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_enrichment_failure_degrades_to_zeroes() {
    let mut hit = artisan("a1", "DP42");
    hit.plain_nom = Some("Jean Dupont".to_string());

    let mut repository = InMemoryRepository::new().with_artisans(vec![hit]);
    repository.fail_counts = true;

    let results = engine(repository)
        .universal_search("dupont", SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.artisans.items.len(), 1);
    assert_eq!(
        results.artisans.items[0].data.active_intervention_count,
        Some(0)
    );
}

#[tokio::test]
async fn test_truncation_sets_has_more() {
    let artisans: Vec<_> = (0..5)
        .map(|n| {
            let mut record = artisan(&format!("a{n}"), &format!("DP{n}"));
            record.plain_nom = Some("Jean Dupont".to_string());
            record
        })
        .collect();

    let repository = InMemoryRepository::new().with_artisans(artisans);
    let options = SearchOptions {
        artisan_limit: Some(2),
        intervention_limit: None,
    };
    let results = engine(repository)
        .universal_search("dupont", options)
        .await
        .unwrap();

    assert_eq!(results.artisans.items.len(), 2);
    assert_eq!(results.artisans.total, 5);
    assert!(results.artisans.has_more);
}

#[tokio::test]
async fn test_intervention_context_biases_fetch_limits() {
    let repository = Arc::new(InMemoryRepository::new());
    let engine = UniversalSearchEngine::with_defaults(repository.clone());

    let results = engine
        .universal_search("INT-4582", SearchOptions::default())
        .await
        .unwrap();
    assert_eq!(results.context, SearchContext::Intervention);

    // Resolved limits 3/8, over-fetched to max(3*3, 3+3) and max(8*5, 8+10).
    let limits = repository.seen_limits.lock().unwrap();
    assert!(limits.contains(&9));
    assert!(limits.contains(&40));
}

#[tokio::test]
async fn test_intervention_results_rank_by_score() {
    let mut strong = intervention("i1", "INT-4582");
    strong.ville = Some("Paris".to_string());
    let mut weak = intervention("i2", "INT-9999");
    weak.commentaire_agent = Some("client parti a Paris".to_string());

    let repository = InMemoryRepository::new().with_interventions(vec![weak, strong]);
    let results = engine(repository)
        .universal_search("paris", SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.interventions.items.len(), 2);
    // City exact (70) outranks comments contains (50).
    assert_eq!(results.interventions.items[0].data.id, "i1");
    assert!(results.interventions.items[0].score > results.interventions.items[1].score);
}

#[tokio::test]
async fn test_same_query_is_idempotent() {
    let mut hit = artisan("a1", "DP42");
    hit.plain_nom = Some("Jean Dupont".to_string());

    let repository = InMemoryRepository::new().with_artisans(vec![hit]);
    let engine = UniversalSearchEngine::with_defaults(Arc::new(repository));

    let first = engine
        .universal_search("dupont", SearchOptions::default())
        .await
        .unwrap();
    let second = engine
        .universal_search("dupont", SearchOptions::default())
        .await
        .unwrap();

    let ids = |group: &crate::core::search::models::SearchResultsGroup<
        crate::core::search::models::ArtisanRecord,
    >| {
        group
            .items
            .iter()
            .map(|item| (item.data.id.clone(), item.score))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first.artisans), ids(&second.artisans));
}
