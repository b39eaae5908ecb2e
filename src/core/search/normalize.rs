//! Query Normalization
//!
//! Pure string utilities shared by the scorers, the ranker tie-breaks and
//! the candidate query builders. All functions are total and deterministic.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize free text for comparison: NFD-decompose, drop combining
/// diacritics, lowercase, trim.
///
/// `"Électricité "` becomes `"electricite"`.
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Keep only ASCII digits. Used for phone-number comparisons, where
/// formatting (`"06 12 34 56 78"`, `"06.12.34.56.78"`) must not matter.
pub fn sanitize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Escape `%` and `_` so user input can be embedded in a `LIKE` pattern
/// without acting as a wildcard. The repository binds patterns with
/// `ESCAPE '\'`.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
