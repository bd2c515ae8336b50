use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical form used to compare answers.
///
/// Lowercases, trims, strips diacritics (NFD decomposition with combining
/// marks dropped) and finally keeps only ASCII lowercase letters and digits.
/// Total over any input; the empty string maps to the empty string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Two answers are equal iff their canonical forms are identical.
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}
