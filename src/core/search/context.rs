//! Context Classification
//!
//! Guesses whether a query targets artisans, interventions, or both, from
//! the shape of the query alone. The guess only biases per-type result
//! limits in the orchestrator; it never filters candidates.

use super::models::SearchContext;

/// Classify a query as an ordered rule chain; the first rule that matches
/// wins.
///
/// 1. empty → mixed
/// 2. `INT-` prefix (case-insensitive) → intervention (reference code)
/// 3. all digits, length ≥ 5 → intervention
/// 4. 2–4 ASCII letters → artisan (associate code)
/// 5. `0[1-9]` prefix once internal spaces are removed → intervention
///    (French phone number)
/// 6. exactly 5 digits → intervention (postal code)
/// 7. otherwise → mixed
pub fn detect_search_context(query: &str) -> SearchContext {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return SearchContext::Mixed;
    }

    if trimmed
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("INT-"))
    {
        return SearchContext::Intervention;
    }

    let is_all_digits = trimmed.chars().all(|c| c.is_ascii_digit());
    if is_all_digits && trimmed.len() >= 5 {
        return SearchContext::Intervention;
    }

    if (2..=4).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return SearchContext::Artisan;
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let mut compact_chars = compact.chars();
    if compact_chars.next() == Some('0')
        && compact_chars.next().is_some_and(|c| ('1'..='9').contains(&c))
    {
        return SearchContext::Intervention;
    }

    // Shadowed by rule 3 for plain digit strings; kept because the chain is
    // order-sensitive by contract.
    if trimmed.len() == 5 && is_all_digits {
        return SearchContext::Intervention;
    }

    SearchContext::Mixed
}
