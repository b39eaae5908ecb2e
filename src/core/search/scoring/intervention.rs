//! Intervention Scorer

use std::collections::BTreeSet;

use super::{apply_multi_field_bonus, fold_max, full_name, text_category_score};
use crate::core::search::models::{InterventionRecord, MatchedField, SearchScore};
use crate::core::search::normalize::{normalize, sanitize_phone};
use crate::core::search::weights::intervention as weights;

/// Score one intervention candidate against a raw query.
///
/// Same max-then-bonus structure as the artisan scorer, over a larger field
/// set. The three assigned-artisan categories (phone, associate code, full
/// name) all read the one artisan resolved by
/// [`InterventionRecord::primary_artisan`].
pub fn score_intervention(intervention: &InterventionRecord, query: &str) -> SearchScore {
    let normalized_query = normalize(query);
    let digits_query = sanitize_phone(query);

    if normalized_query.is_empty() && digits_query.is_empty() {
        return SearchScore::none();
    }

    let mut score = 0u8;
    let mut matched: BTreeSet<MatchedField> = BTreeSet::new();
    let primary_artisan = intervention.primary_artisan();
    let contact = intervention.contact();

    if let Some(reference) = intervention.id_inter.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(reference), &normalized_query, weights::REFERENCE)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::InterventionId);
        }
    }

    // Assigned-artisan phone: first phone field that matches wins, no
    // stacking. Exact compares digit-sanitized values; prefix/substring
    // compare the normalized raw phone.
    if let Some(artisan) = primary_artisan {
        for phone in [artisan.telephone.as_deref(), artisan.telephone2.as_deref()]
            .into_iter()
            .flatten()
        {
            let sanitized = sanitize_phone(phone);
            let normalized_phone = normalize(phone);
            let sub = if !digits_query.is_empty()
                && !sanitized.is_empty()
                && sanitized == digits_query
            {
                weights::ARTISAN_PHONE.exact
            } else if !normalized_query.is_empty()
                && normalized_phone.starts_with(&normalized_query)
            {
                weights::ARTISAN_PHONE.prefix
            } else if !normalized_query.is_empty() && normalized_phone.contains(&normalized_query) {
                weights::ARTISAN_PHONE.contains
            } else {
                None
            };
            if let Some(sub) = sub {
                score = fold_max(score, sub);
                matched.insert(MatchedField::NumeroSst);
                break;
            }
        }
    }

    if let Some(contexte) = intervention.contexte_intervention.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(contexte), &normalized_query, weights::CONTEXTE)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Contexte);
        }
    }

    // Client phone: digit-sanitized only, both fields, one tag.
    if let Some(contact) = contact {
        for phone in [contact.telephone.as_deref(), contact.telephone2.as_deref()]
            .into_iter()
            .flatten()
        {
            let sanitized = sanitize_phone(phone);
            if let Some(sub) = text_category_score(&sanitized, &digits_query, weights::CLIENT_PHONE)
            {
                score = fold_max(score, sub);
                matched.insert(MatchedField::Telephone);
            }
        }

        if let Some(name) = full_name(&[contact.firstname.as_deref(), contact.lastname.as_deref()])
        {
            if let Some(sub) =
                text_category_score(&normalize(&name), &normalized_query, weights::CLIENT_NAME)
            {
                score = fold_max(score, sub);
                matched.insert(MatchedField::Client);
            }
        }
    }

    if let Some(address) = intervention.adresse.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(address), &normalized_query, weights::ADDRESS)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Address);
        }
    }

    if let Some(city) = intervention.ville.as_deref() {
        if let Some(sub) = text_category_score(&normalize(city), &normalized_query, weights::CITY) {
            score = fold_max(score, sub);
            matched.insert(MatchedField::City);
        }
    }

    if let Some(postal) = intervention.code_postal.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(postal), &normalized_query, weights::POSTAL)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Postal);
        }
    }

    if let Some(comment) = intervention.commentaire_agent.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(comment), &normalized_query, weights::COMMENTS)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Comments);
        }
    }

    if let Some(consigne) = intervention.consigne_intervention.as_deref() {
        if let Some(sub) =
            text_category_score(&normalize(consigne), &normalized_query, weights::NOTES)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::Notes);
        }
    }

    let assigned_user_code = intervention
        .assigned_user
        .as_ref()
        .and_then(|user| user.code_gestionnaire.as_deref().or(user.username.as_deref()));
    if let Some(code) = assigned_user_code {
        if let Some(sub) =
            text_category_score(&normalize(code), &normalized_query, weights::ASSIGNED_USER)
        {
            score = fold_max(score, sub);
            matched.insert(MatchedField::AssignedUser);
        }
    }

    if let Some(code) = primary_artisan.and_then(|a| a.numero_associe.as_deref()) {
        if let Some(sub) = text_category_score(
            &normalize(code),
            &normalized_query,
            weights::ASSIGNED_ARTISAN_CODE,
        ) {
            score = fold_max(score, sub);
            matched.insert(MatchedField::AssignedArtisan);
        }
    }

    if let Some(artisan) = primary_artisan {
        if let Some(name) = full_name(&[artisan.prenom.as_deref(), artisan.nom.as_deref()]) {
            if let Some(sub) = text_category_score(
                &normalize(&name),
                &normalized_query,
                weights::ASSIGNED_ARTISAN_NAME,
            ) {
                score = fold_max(score, sub);
                matched.insert(MatchedField::AssignedArtisanName);
            }
        }
    }

    if let Some(label) = intervention.metier.as_ref().and_then(|m| m.label.as_deref()) {
        if let Some(sub) =
            text_category_score(&normalize(label), &normalized_query, weights::METIER)
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
