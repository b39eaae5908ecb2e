//! Candidate Repository Contract
//!
//! The search engine never talks to storage directly: it hands the storage
//! layer a structured, injection-free predicate list (tagged match kind ×
//! whitelisted column) plus an over-fetch row limit, and gets back candidate
//! rows with an exact total count. The SQLite implementation lives in
//! `crate::database`; tests substitute an in-memory double.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::Result;
use super::models::{ArtisanRecord, InterventionRecord};
use super::normalize::{escape_like, sanitize_phone};

// ============================================================================
// Over-fetch multipliers
// ============================================================================

/// Artisans: every scoring category is also a filter column, so a modest
/// over-fetch absorbs ranking disagreement between filter and scorer.
pub const ARTISAN_OVERFETCH_MULTIPLIER: usize = 3;
pub const ARTISAN_OVERFETCH_FLOOR: usize = 3;

/// Interventions: categories like the assigned-artisan phone cannot be
/// expressed as a filter on the primary table and are only evaluated
/// client-side after fetch, so the over-fetch is larger.
pub const INTERVENTION_OVERFETCH_MULTIPLIER: usize = 5;
pub const INTERVENTION_OVERFETCH_FLOOR: usize = 10;

/// Rows to request for a given result limit.
pub const fn over_fetch(limit: usize, multiplier: usize, floor: usize) -> usize {
    let scaled = limit * multiplier;
    let padded = limit + floor;
    if scaled > padded {
        scaled
    } else {
        padded
    }
}

// ============================================================================
// Structured predicates
// ============================================================================

/// How a pattern is matched against a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    Exact,
    Prefix,
    Contains,
}

/// Filterable columns of the artisans table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtisanColumn {
    NumeroAssocie,
    PlainNom,
    RaisonSociale,
    Prenom,
    Nom,
    Email,
    Telephone,
    Telephone2,
}

impl ArtisanColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumeroAssocie => "numero_associe",
            Self::PlainNom => "plain_nom",
            Self::RaisonSociale => "raison_sociale",
            Self::Prenom => "prenom",
            Self::Nom => "nom",
            Self::Email => "email",
            Self::Telephone => "telephone",
            Self::Telephone2 => "telephone2",
        }
    }
}

/// Filterable columns of the interventions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterventionColumn {
    IdInter,
    ContexteIntervention,
    Adresse,
    Ville,
    CodePostal,
    CommentaireAgent,
    ConsigneIntervention,
}

impl InterventionColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IdInter => "id_inter",
            Self::ContexteIntervention => "contexte_intervention",
            Self::Adresse => "adresse",
            Self::Ville => "ville",
            Self::CodePostal => "code_postal",
            Self::CommentaireAgent => "commentaire_agent",
            Self::ConsigneIntervention => "consigne_intervention",
        }
    }
}

/// One column filter; the pattern is already wildcard-escaped.
#[derive(Debug, Clone)]
pub struct ColumnPredicate<C> {
    pub column: C,
    pub matcher: TextMatch,
    pub pattern: String,
}

/// A candidate query: OR-combined case-insensitive column filters plus an
/// over-fetch row limit. The exact total count is evaluated against the
/// same filters, independent of the limit.
#[derive(Debug, Clone)]
pub struct CandidateQuery<C> {
    pub filters: Vec<ColumnPredicate<C>>,
    pub fetch_limit: usize,
}

/// Candidate rows plus the exact total match count.
#[derive(Debug, Clone)]
pub struct CandidateSet<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

// ============================================================================
// Query builders
// ============================================================================

/// Build the artisan candidate query for a trimmed, non-empty query string.
///
/// Phone columns are filtered with the digits-only form of the query when it
/// has any; otherwise they fall back to the text pattern.
pub fn artisan_candidate_query(query: &str, limit: usize) -> CandidateQuery<ArtisanColumn> {
    let pattern = escape_like(query.trim());
    let digits = sanitize_phone(query);

    let mut filters: Vec<ColumnPredicate<ArtisanColumn>> = [
        ArtisanColumn::NumeroAssocie,
        ArtisanColumn::PlainNom,
        ArtisanColumn::RaisonSociale,
        ArtisanColumn::Prenom,
        ArtisanColumn::Nom,
        ArtisanColumn::Email,
    ]
    .into_iter()
    .map(|column| ColumnPredicate {
        column,
        matcher: TextMatch::Contains,
        pattern: pattern.clone(),
    })
    .collect();

    let phone_pattern = if digits.is_empty() { pattern } else { digits };
    for column in [ArtisanColumn::Telephone, ArtisanColumn::Telephone2] {
        filters.push(ColumnPredicate {
            column,
            matcher: TextMatch::Contains,
            pattern: phone_pattern.clone(),
        });
    }

    CandidateQuery {
        filters,
        fetch_limit: over_fetch(limit, ARTISAN_OVERFETCH_MULTIPLIER, ARTISAN_OVERFETCH_FLOOR),
    }
}

/// Build the intervention candidate query for a trimmed, non-empty query
/// string. Only direct columns are filtered; relation-borne categories are
/// scored client-side, which the larger over-fetch compensates for.
pub fn intervention_candidate_query(
    query: &str,
    limit: usize,
) -> CandidateQuery<InterventionColumn> {
    let pattern = escape_like(query.trim());

    let filters = [
        InterventionColumn::IdInter,
        InterventionColumn::ContexteIntervention,
        InterventionColumn::Adresse,
        InterventionColumn::Ville,
        InterventionColumn::CodePostal,
        InterventionColumn::CommentaireAgent,
        InterventionColumn::ConsigneIntervention,
    ]
    .into_iter()
    .map(|column| ColumnPredicate {
        column,
        matcher: TextMatch::Contains,
        pattern: pattern.clone(),
    })
    .collect();

    CandidateQuery {
        filters,
        fetch_limit: over_fetch(
            limit,
            INTERVENTION_OVERFETCH_MULTIPLIER,
            INTERVENTION_OVERFETCH_FLOOR,
        ),
    }
}

// ============================================================================
// Repository trait
// ============================================================================

/// Storage-layer collaborator the orchestrator fans out to.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Artisan candidates matching the query, with the exact total count.
    async fn find_artisan_candidates(
        &self,
        query: &CandidateQuery<ArtisanColumn>,
    ) -> Result<CandidateSet<ArtisanRecord>>;

    /// Intervention candidates matching the query, with the exact total
    /// count.
    async fn find_intervention_candidates(
        &self,
        query: &CandidateQuery<InterventionColumn>,
    ) -> Result<CandidateSet<InterventionRecord>>;

    /// Number of distinct active interventions linked to each artisan id.
    /// Ids absent from the map have no active interventions.
    async fn active_intervention_counts(
        &self,
        artisan_ids: &[String],
    ) -> Result<HashMap<String, u32>>;
}
