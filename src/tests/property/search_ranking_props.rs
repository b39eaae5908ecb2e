//! Ranking invariants over arbitrary scored candidate sets.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::core::search::models::{MatchedField, ScoredCandidate, SearchEntityType, SearchScore};
use crate::core::search::ranker::rank;

#[derive(Debug, Clone)]
struct Probe {
    key: String,
}

fn candidates() -> impl Strategy<Value = Vec<ScoredCandidate<Probe>>> {
    proptest::collection::vec((0u8..=100, "[a-z]{0,6}"), 0..32).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(score, key)| {
                let matched_fields = if score > 0 {
                    BTreeSet::from([MatchedField::Name])
                } else {
                    BTreeSet::new()
                };
                ScoredCandidate {
                    record: Probe { key },
                    score: SearchScore {
                        score,
                        matched_fields,
                    },
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn output_is_sorted_and_truncated(
        candidates in candidates(),
        limit in 0usize..16,
    ) {
        let total = candidates.len() as u64;
        let group = rank(
            candidates,
            SearchEntityType::Artisan,
            limit,
            total,
            |record: &Probe| record.key.clone(),
        );

        prop_assert!(group.items.len() <= limit);
        prop_assert!(group.items.iter().all(|item| item.score > 0));
        prop_assert!(group
            .items
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn ties_break_on_secondary_key(
        candidates in candidates(),
    ) {
        let total = candidates.len() as u64;
        let group = rank(
            candidates,
            SearchEntityType::Intervention,
            usize::MAX,
            total,
            |record: &Probe| record.key.clone(),
        );

        let ordered = group.items.windows(2).all(|pair| {
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].data.key <= pair[1].data.key)
        });
        prop_assert!(ordered);
    }

    #[test]
    fn has_more_is_consistent_with_total(
        candidates in candidates(),
        limit in 0usize..16,
        extra in 0u64..8,
    ) {
        let total = candidates.len() as u64 + extra;
        let group = rank(
            candidates,
            SearchEntityType::Artisan,
            limit,
            total,
            |record: &Probe| record.key.clone(),
        );

        prop_assert_eq!(group.total, total);
        prop_assert_eq!(group.has_more, total > group.items.len() as u64);
    }
}
