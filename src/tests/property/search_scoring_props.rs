//! Scoring invariants over arbitrary queries and records.

use proptest::prelude::*;

use crate::core::search::scoring::{score_artisan, score_intervention};
use crate::tests::common::fixtures::{artisan, intervention};

fn field() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9àéèêïô @._-]{0,24}")
}

fn query() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9àéè @._-]{0,16}"
}

proptest! {
    #[test]
    fn artisan_score_is_bounded(
        query in query(),
        plain_nom in field(),
        raison_sociale in field(),
        email in field(),
        telephone in field(),
        numero_associe in field(),
    ) {
        let mut record = artisan("a1", "XX00");
        record.plain_nom = plain_nom;
        record.raison_sociale = raison_sociale;
        record.email = email;
        record.telephone = telephone;
        record.numero_associe = numero_associe;

        let score = score_artisan(&record, &query);
        prop_assert!(score.score <= 100);
    }

    #[test]
    fn artisan_matched_fields_empty_iff_zero(
        query in query(),
        plain_nom in field(),
        raison_sociale in field(),
    ) {
        let mut record = artisan("a1", "XX00");
        record.plain_nom = plain_nom;
        record.raison_sociale = raison_sociale;

        let score = score_artisan(&record, &query);
        prop_assert_eq!(score.matched_fields.is_empty(), score.score == 0);
    }

    #[test]
    fn artisan_scoring_is_deterministic(
        query in query(),
        plain_nom in field(),
    ) {
        let mut record = artisan("a1", "XX00");
        record.plain_nom = plain_nom;

        let first = score_artisan(&record, &query);
        let second = score_artisan(&record, &query);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn intervention_score_is_bounded(
        query in query(),
        reference in field(),
        contexte in field(),
        adresse in field(),
        ville in field(),
        code_postal in field(),
        commentaire in field(),
    ) {
        let mut record = intervention("i1", "INT-0");
        record.id_inter = reference;
        record.contexte_intervention = contexte;
        record.adresse = adresse;
        record.ville = ville;
        record.code_postal = code_postal;
        record.commentaire_agent = commentaire;

        let score = score_intervention(&record, &query);
        prop_assert!(score.score <= 100);
    }

    #[test]
    fn intervention_matched_fields_empty_iff_zero(
        query in query(),
        contexte in field(),
        ville in field(),
    ) {
        let mut record = intervention("i1", "INT-0");
        record.id_inter = None;
        record.contexte_intervention = contexte;
        record.ville = ville;

        let score = score_intervention(&record, &query);
        prop_assert_eq!(score.matched_fields.is_empty(), score.score == 0);
    }
}
