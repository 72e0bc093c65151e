//! String comparison and canonical forms.
//!
//! The similarity metric is deliberately simple: exact match, then substring
//! containment (scaled by length ratio), then normalized Levenshtein distance.
//! Callers are expected to normalize both sides first via [`normalize_artist`]
//! or [`normalize_title`] so that case and punctuation differences don't eat
//! into the edit-distance budget.

use std::sync::LazyLock;

use regex::Regex;

/// A title split into its base and trailing parenthetical segment.
///
/// Only a `(...)` or `[...]` group anchored at the very end of the string is
/// split off; mid-string parentheses stay in `base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesisInfo {
    /// Text before the trailing group (the whole string if there is none).
    pub base: String,
    /// Text inside the trailing group, typically a remix/edit name.
    pub mix_info: Option<String>,
    /// The original input, trimmed.
    pub full: String,
}

static TRAILING_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\S)\s*[(\[]([^)\]]+)[)\]]\s*$").unwrap());

/// Split a trailing `(Remix)` / `[Club Mix]` segment off a title.
pub fn extract_parenthesis_info(title: &str) -> ParenthesisInfo {
    let full = title.trim().to_string();

    if let Some(caps) = TRAILING_PARENS.captures(&full) {
        let base = caps[1].trim().to_string();
        let mix = caps[2].trim().to_string();
        if !mix.is_empty() {
            return ParenthesisInfo {
                base,
                mix_info: Some(mix),
                full,
            };
        }
    }

    ParenthesisInfo {
        base: full.clone(),
        mix_info: None,
        full,
    }
}

/// Compare two strings for similarity, 0.0 to 1.0.
///
/// Equal strings score 1. If one is a substring of the other the score is the
/// length ratio of the shorter to the longer. Otherwise the score is a
/// normalized Levenshtein similarity `(max_len - distance) / max_len`.
/// Either input empty scores 0.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (short, long, short_len, long_len) = if a_len <= b_len {
        (a, b, a_len, b_len)
    } else {
        (b, a, b_len, a_len)
    };

    if long.contains(short) {
        return short_len as f64 / long_len as f64;
    }

    let distance = strsim::levenshtein(a, b);
    (long_len.saturating_sub(distance)) as f64 / long_len as f64
}

/// Prefixes stripped from artist names before comparison ("The Prodigy" and
/// "Prodigy" are the same act; "DJ Rush" is credited both ways).
const ARTIST_PREFIXES: &[&str] = &["the ", "dj ", "mc ", "dr ", "mr ", "mrs ", "ms "];

/// Canonical form of an artist name for comparison.
///
/// Lowercases, strips one leading honorific/DJ-style prefix, drops
/// punctuation, and collapses whitespace.
pub fn normalize_artist(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    for prefix in ARTIST_PREFIXES {
        if out.starts_with(prefix) && out.len() > prefix.len() {
            out = out[prefix.len()..].to_string();
            break;
        }
    }
    strip_punctuation(&out)
}

/// Canonical form of a title for comparison: lowercase, punctuation stripped,
/// whitespace collapsed. Unlike artists, no prefix handling.
pub fn normalize_title(s: &str) -> String {
    strip_punctuation(&s.trim().to_lowercase())
}

fn strip_punctuation(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words that carry meaning for overlap scoring: normalized words longer than
/// two characters.
pub fn significant_words(s: &str) -> Vec<String> {
    normalize_title(s)
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}
