//! Text normalization shared by product fields and queries.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip diacritics and trim.
///
/// NFKD splits precomposed characters (`é` → `e` + U+0301) so dropping the
/// combining marks leaves the base letter behind.
pub fn normalize(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Normalize an optional field, treating `None` as empty.
pub fn normalize_opt(s: Option<&str>) -> String {
    s.map(normalize).unwrap_or_default()
}
