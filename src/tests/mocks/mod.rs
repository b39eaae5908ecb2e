//! Mock implementations for testing
//!
//! An in-memory search repository double: it hands back whatever candidate
//! rows it was seeded with (the engine re-scores and ranks them anyway) and
//! can be told to fail either fetch or the count enrichment.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::search::error::{Result, SearchError};
use crate::core::search::models::{ArtisanRecord, InterventionRecord};
use crate::core::search::repository::{
    ArtisanColumn, CandidateQuery, CandidateSet, InterventionColumn, SearchRepository,
};

/// Repository double backed by plain vectors.
#[derive(Default)]
pub struct InMemoryRepository {
    pub artisans: Vec<ArtisanRecord>,
    pub interventions: Vec<InterventionRecord>,
    /// Active-intervention counts keyed by artisan id.
    pub counts: HashMap<String, u32>,
    pub fail_artisans: bool,
    pub fail_interventions: bool,
    pub fail_counts: bool,
    /// Fetch limits the engine asked for, in call order.
    pub seen_limits: Mutex<Vec<usize>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artisans(mut self, artisans: Vec<ArtisanRecord>) -> Self {
        self.artisans = artisans;
        self
    }

    pub fn with_interventions(mut self, interventions: Vec<InterventionRecord>) -> Self {
        self.interventions = interventions;
        self
    }

    pub fn with_counts(mut self, counts: HashMap<String, u32>) -> Self {
        self.counts = counts;
        self
    }
}

#[async_trait]
impl SearchRepository for InMemoryRepository {
    async fn find_artisan_candidates(
        &self,
        query: &CandidateQuery<ArtisanColumn>,
    ) -> Result<CandidateSet<ArtisanRecord>> {
        if self.fail_artisans {
            return Err(SearchError::Repository("artisan fetch failed".into()));
        }
        self.seen_limits.lock().unwrap().push(query.fetch_limit);
        let rows: Vec<ArtisanRecord> = self
            .artisans
            .iter()
            .take(query.fetch_limit)
            .cloned()
            .collect();
        Ok(CandidateSet {
            rows,
            total: self.artisans.len() as u64,
        })
    }

    async fn find_intervention_candidates(
        &self,
        query: &CandidateQuery<InterventionColumn>,
    ) -> Result<CandidateSet<InterventionRecord>> {
        if self.fail_interventions {
            return Err(SearchError::Repository("intervention fetch failed".into()));
        }
        self.seen_limits.lock().unwrap().push(query.fetch_limit);
        let rows: Vec<InterventionRecord> = self
            .interventions
            .iter()
            .take(query.fetch_limit)
            .cloned()
            .collect();
        Ok(CandidateSet {
            rows,
            total: self.interventions.len() as u64,
        })
    }

    async fn active_intervention_counts(
        &self,
        artisan_ids: &[String],
    ) -> Result<HashMap<String, u32>> {
        if self.fail_counts {
            return Err(SearchError::Repository("count query failed".into()));
        }
        Ok(artisan_ids
            .iter()
            .filter_map(|id| self.counts.get(id).map(|count| (id.clone(), *count)))
            .collect())
    }
}
