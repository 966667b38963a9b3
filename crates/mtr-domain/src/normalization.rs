//! Text normalization for catalog search.
//!
//! Search must be forgiving about case, accents and spacing so that a learner
//! typing `"resume ecrire"` finds `"Résumé  Écrire"`.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize text for substring search.
///
/// Lowercases, expands common ligatures, strips combining marks after NFD
/// decomposition, and collapses runs of whitespace into single spaces.
/// Punctuation is kept so that searches like `"c++"` still work.
pub fn normalize_for_search(s: &str) -> String {
    s.to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `haystack` contains `needle` once both are normalized.
/// An empty needle matches everything.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let needle = normalize_for_search(needle);
    needle.is_empty() || normalize_for_search(haystack).contains(&needle)
}
