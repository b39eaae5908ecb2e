//! Universal Search Engine
//!
//! One free-text query in, one grouped, ranked, truncated response out.
//!
//! # Architecture
//!
//! - [`normalize`]: pure string utilities (diacritics, digits, wildcards)
//! - [`context`]: query-intent classification (limit biasing only)
//! - [`weights`] + [`scoring`]: per-category weight tables and the two
//!   pure scorers (max across categories, then a cross-category bonus)
//! - [`ranker`]: filter, stable sort, truncate
//! - [`repository`]: structured-predicate contract to the storage layer
//! - [`orchestrator`]: limit resolution, concurrent fan-out, enrichment
//!   sequencing, timing

pub mod context;
pub mod error;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod ranker;
pub mod repository;
pub mod scoring;
pub mod weights;

pub use context::detect_search_context;
pub use error::{Result, SearchError};
pub use models::{
    ArtisanRecord, GroupedSearchResults, InterventionRecord, MatchedField, SearchContext,
    SearchEntityType, SearchOptions, SearchResult, SearchResultsGroup, SearchScore,
};
pub use orchestrator::UniversalSearchEngine;
pub use repository::{CandidateQuery, CandidateSet, SearchRepository};
pub use scoring::{score_artisan, score_intervention};
