//! Text normalization primitives shared by the lexicon and the vectorizer.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Anything that is not a letter, digit, whitespace or apostrophe.
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[^\p{L}\p{N}\s']+").unwrap()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\s+").unwrap()
});

/// Fold accents, lowercase, replace punctuation with spaces and collapse
/// whitespace.
///
/// Apostrophes are kept so contractions like `don't` survive as one word.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = folded.to_lowercase().replace('\u{2019}', "'");
    let stripped = PUNCTUATION.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Split text into normalized word tokens.
///
/// Empty or punctuation-only input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Clamp a value into `[-1, 1]`. NaN maps to `0.0`.
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(-1.0, 1.0)
}
