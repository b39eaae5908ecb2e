//! Artisan Scorer

use std::collections::BTreeSet;

use super::{apply_multi_field_bonus, fold_max, full_name, text_category_score};
use crate::core::search::models::{ArtisanRecord, MatchedField, SearchScore};
use crate::core::search::normalize::{normalize, sanitize_phone};
use crate::core::search::weights::artisan as weights;

/// Score one artisan candidate against a raw query.
///
/// Pure and deterministic; the query is normalized (and digit-sanitized for
/// phone comparison) exactly once per call.
pub fn score_artisan(artisan: &ArtisanRecord, query: &str) -> SearchScore {
    let normalized_query = normalize(query);
    let digits_query = sanitize_phone(query);

    if normalized_query.is_empty() && digits_query.is_empty() {
        return SearchScore::none();
    }

    let mut score = 0u8;
    let mut matched: BTreeSet<MatchedField> = BTreeSet::new();

    if let Some(code) = artisan.numero_associe.as_deref() {
        if let Some(sub) = text_category_score(&normalize(code), &normalized_query, weights::CODE) {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Code);
        }
    }

    if let Some(company) = artisan.raison_sociale.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(company), &normalized_query, weights::COMPANY)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Company);
        }
    }

    if let Some(name) = full_name(&[artisan.prenom.as_deref(), artisan.nom.as_deref()]) {
        if let Some(sub) = text_category_score(&normalize(&name), &normalized_query, weights::NAME)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Name);
        }
    }

    // Both phone fields feed one category; the tag is added once.
    for phone in [artisan.telephone.as_deref(), artisan.telephone2.as_deref()]
        .into_iter()
        .flatten()
    {
        let sanitized = sanitize_phone(phone);
        if let Some(sub) = text_category_score(&sanitized, &digits_query, weights::TELEPHONE) {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Telephone);
        }
    }

    // Single characters match too many inboxes to be useful.
    if normalized_query.chars().count() > 1 {
        if let Some(email) = artisan.email.as_deref() {
            if let Some(sub) =
                text_category_score(&normalize(email), &normalized_query, weights::EMAIL)
            {
                score = fold_max(score, sub);
                matched.insert(MatchedField::Email);
            }
        }
    }

    if let Some(label) = artisan.primary_metier().and_then(|m| m.label.as_deref()) {
        if let Some(sub) = text_category_score(&normalize(label), &normalized_query, weights::METIER)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Metier);
        }
    }

    SearchScore {
        score: apply_multi_field_bonus(score, matched.len()),
        matched_fields: matched,
    }
}
