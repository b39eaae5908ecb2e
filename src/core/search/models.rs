//! Search Domain Models
//!
//! Records returned by the candidate repository, the scoring output types
//! and the grouped response shape. Response-level types serialize with
//! camelCase field names; records keep their storage column names.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ============================================================================
// Context
// ============================================================================

/// Entity type of a single search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEntityType {
    Artisan,
    Intervention,
}

/// Likely intent of a query, guessed from its shape alone.
///
/// Classification only biases per-type result limits; it never filters or
/// excludes candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContext {
    Artisan,
    Intervention,
    Mixed,
}

// ============================================================================
// Matched field tags
// ============================================================================

/// Field category that contributed to a candidate's score.
///
/// One tag per category, regardless of how many sub-fields inside the
/// category matched (both phone fields of an artisan tag `Telephone` once).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchedField {
    // Artisan categories
    Code,
    Company,
    Name,
    Telephone,
    Email,
    Metier,
    // Intervention categories
    InterventionId,
    NumeroSst,
    Contexte,
    Client,
    Address,
    City,
    Postal,
    Comments,
    Notes,
    AssignedUser,
    AssignedArtisan,
    AssignedArtisanName,
}

// ============================================================================
// Score and result types
// ============================================================================

/// Relevance score for one candidate.
///
/// Invariant: `matched_fields` is empty exactly when `score == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchScore {
    pub score: u8,
    pub matched_fields: BTreeSet<MatchedField>,
}

impl SearchScore {
    /// A zero score with no matched fields.
    pub fn none() -> Self {
        Self {
            score: 0,
            matched_fields: BTreeSet::new(),
        }
    }
}

/// A scored candidate, before ranking.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<T> {
    pub record: T,
    pub score: SearchScore,
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    #[serde(rename = "type")]
    pub entity_type: SearchEntityType,
    pub data: T,
    pub score: u8,
    pub matched_fields: BTreeSet<MatchedField>,
}

/// One entity type's slice of the response.
///
/// `items` is sorted by score descending with a per-entity secondary key
/// ascending; `has_more == (total > items.len())`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultsGroup<T> {
    pub items: Vec<SearchResult<T>>,
    pub total: u64,
    pub has_more: bool,
}

impl<T> SearchResultsGroup<T> {
    /// An empty, well-formed group.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            has_more: false,
        }
    }
}

/// Full response of a universal search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSearchResults {
    pub artisans: SearchResultsGroup<ArtisanRecord>,
    pub interventions: SearchResultsGroup<InterventionRecord>,
    pub context: SearchContext,
    pub search_time_ms: u64,
}

/// Caller-supplied per-type limits. An explicit limit always wins over the
/// context-based resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub artisan_limit: Option<usize>,
    pub intervention_limit: Option<usize>,
}

// ============================================================================
// Reference records (joined lookups)
// ============================================================================

/// Status lookup row (artisan or intervention statuses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRef {
    pub id: String,
    pub code: Option<String>,
    pub label: Option<String>,
    pub color: Option<String>,
}

/// Trade (métier) lookup row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetierRef {
    pub id: String,
    pub code: Option<String>,
    pub label: Option<String>,
}

// ============================================================================
// Artisan record
// ============================================================================

/// Trade association of an artisan; at most one is flagged primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtisanMetier {
    pub is_primary: Option<bool>,
    pub metier: Option<MetierRef>,
}

/// Artisan candidate as returned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtisanRecord {
    pub id: String,
    pub prenom: Option<String>,
    pub nom: Option<String>,
    pub plain_nom: Option<String>,
    pub raison_sociale: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub telephone2: Option<String>,
    pub numero_associe: Option<String>,
    pub statut_id: Option<String>,
    pub is_active: Option<bool>,
    pub status: Option<StatusRef>,
    #[serde(default)]
    pub metiers: Vec<ArtisanMetier>,
    /// Derived annotation added after ranking; never affects the score.
    #[serde(rename = "activeInterventionCount", skip_serializing_if = "Option::is_none")]
    pub active_intervention_count: Option<u32>,
}

impl ArtisanRecord {
    /// The trade flagged primary, falling back to the first association.
    pub fn primary_metier(&self) -> Option<&MetierRef> {
        self.metiers
            .iter()
            .find(|entry| entry.is_primary == Some(true))
            .or_else(|| self.metiers.first())
            .and_then(|entry| entry.metier.as_ref())
    }
}

// ============================================================================
// Intervention record
// ============================================================================

/// Tenant/client contact attached to an intervention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub telephone: Option<String>,
    pub telephone2: Option<String>,
    pub email: Option<String>,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub ville: Option<String>,
}

/// Back-office user an intervention is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedUser {
    pub id: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub username: Option<String>,
    pub code_gestionnaire: Option<String>,
    pub color: Option<String>,
}

/// Artisan sub-record embedded in an intervention assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtisanRef {
    pub id: String,
    pub prenom: Option<String>,
    pub nom: Option<String>,
    pub numero_associe: Option<String>,
    pub telephone: Option<String>,
    pub telephone2: Option<String>,
}

/// Assignment of an artisan to an intervention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionArtisan {
    pub is_primary: Option<bool>,
    pub role: Option<String>,
    pub artisan: Option<ArtisanRef>,
}

/// Intervention candidate as returned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRecord {
    pub id: String,
    pub id_inter: Option<String>,
    pub agence_id: Option<String>,
    pub statut_id: Option<String>,
    pub metier_id: Option<String>,
    pub assigned_user_id: Option<String>,
    pub contexte_intervention: Option<String>,
    pub consigne_intervention: Option<String>,
    pub commentaire_agent: Option<String>,
    pub adresse: Option<String>,
    pub code_postal: Option<String>,
    pub ville: Option<String>,
    pub date: Option<String>,
    pub date_prevue: Option<String>,
    pub due_date: Option<String>,
    pub tenant: Option<ContactRecord>,
    pub status: Option<StatusRef>,
    pub metier: Option<MetierRef>,
    pub assigned_user: Option<AssignedUser>,
    #[serde(default)]
    pub intervention_artisans: Vec<InterventionArtisan>,
}

impl InterventionRecord {
    /// The assignment flagged primary, falling back to the first one.
    ///
    /// The assigned-artisan phone, associate-code and full-name scoring
    /// categories all read this same resolved artisan.
    pub fn primary_artisan(&self) -> Option<&ArtisanRef> {
        self.intervention_artisans
            .iter()
            .find(|entry| entry.is_primary == Some(true))
            .or_else(|| self.intervention_artisans.first())
            .and_then(|entry| entry.artisan.as_ref())
    }

    /// The contact the client-facing scoring categories read.
    pub fn contact(&self) -> Option<&ContactRecord> {
        self.tenant.as_ref()
    }
}
