//! Typo/fuzzy variant generation.
//!
//! User-supplied tags misspell artists in predictable ways: doubled letters,
//! phonetic swaps, digits written out as words, compound words jammed
//! together. Each rule below produces at most a handful of candidate
//! corrections from the original string; the combined list is deduplicated
//! and capped so downstream strategy generation stays bounded.

use smallvec::SmallVec;

use super::similarity::{extract_parenthesis_info, normalize_artist};

/// Hard cap on the number of variants one input can produce.
const MAX_VARIANTS: usize = 20;

/// Words whose doubled letters are legitimate English, not typos.
/// "Twoo" collapses to "Two"; "Good" must not collapse to "God".
const LEGITIMATE_DOUBLES: &[&str] = &[
    "all", "ball", "been", "bell", "book", "call", "class", "cool", "door", "fall", "feel",
    "free", "full", "good", "hall", "keep", "less", "look", "loop", "miss", "moon", "need",
    "off", "press", "room", "school", "see", "seen", "small", "soon", "speed", "still",
    "street", "sweet", "tall", "three", "too", "wall", "week", "well", "will",
];

/// Phonetic substitutions applied to the lowercased input, both directions.
const PHONETIC_PAIRS: &[(&str, &str)] = &[
    ("ph", "f"),
    ("f", "ph"),
    ("ck", "k"),
    ("k", "ck"),
    ("x", "ks"),
    ("ks", "x"),
];

/// Small number words and their digit forms.
const NUMBER_WORDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
];

/// Genre/thematic words used to split jammed-together compounds
/// ("Basemania" -> "Base Mania").
const COMPOUND_WORDS: &[&str] = &[
    "acid", "base", "bass", "beat", "break", "club", "core", "dance", "dark", "deep", "dream",
    "drum", "fire", "funk", "hard", "house", "land", "mania", "moon", "night", "rave", "rock",
    "sound", "soul", "star", "step", "storm", "style", "tech", "trance", "wave", "world",
];

/// Generate up to [`MAX_VARIANTS`] fuzzy-corrected variants of a string.
///
/// The original string is never included. Variants are generated by
/// independent single rules, not chained.
pub fn fuzzy_variants(s: &str) -> Vec<String> {
    let s = s.trim();
    let mut variants: SmallVec<[String; 8]> = SmallVec::new();
    if s.is_empty() {
        return variants.into_vec();
    }

    push_variant(&mut variants, s, collapse_doubled_letters(s));

    let lower = s.to_lowercase();
    for &(from, to) in PHONETIC_PAIRS {
        if lower.contains(from) {
            push_variant(&mut variants, s, match_leading_case(s, &lower.replace(from, to)));
        }
    }
    push_variant(&mut variants, s, match_leading_case(s, &swap_c_k_before_vowel(&lower, 'c', 'k')));
    push_variant(&mut variants, s, match_leading_case(s, &swap_c_k_before_vowel(&lower, 'k', 'c')));
    push_variant(&mut variants, s, match_leading_case(s, &swap_word_ending(&lower, "y", "ie")));
    push_variant(&mut variants, s, match_leading_case(s, &swap_word_ending(&lower, "ie", "y")));

    for &(word, digit) in NUMBER_WORDS {
        push_variant(&mut variants, s, replace_whole_word(s, word, digit));
        push_variant(&mut variants, s, replace_whole_word(s, digit, word));
    }

    if !s.contains(char::is_whitespace) && vowel_groups(s) >= 2 {
        if let Some(split) = camel_case_split(s) {
            push_variant(&mut variants, s, split);
        }
        for split in dictionary_splits(s) {
            push_variant(&mut variants, s, split);
        }
    }

    variants.into_vec()
}

/// Progressively simplified renderings of an artist name, most faithful
/// first. The first entry is always the trimmed original; later tiers drop
/// punctuation, prefixes, trailing parentheticals, and collaborator tails.
pub fn artist_name_tiers(s: &str) -> Vec<String> {
    let original = s.trim().to_string();
    let mut tiers: Vec<String> = Vec::new();
    if original.is_empty() {
        return tiers;
    }

    let mut push = |candidate: String| {
        let candidate = candidate.trim().to_string();
        if !candidate.is_empty() && !tiers.contains(&candidate) {
            tiers.push(candidate);
        }
    };

    push(original.clone());
    push(normalize_artist(&original));
    push(normalize_artist(&extract_parenthesis_info(&original).base));
    push(normalize_artist(&original.replace('&', " and ")));
    push(normalize_artist(strip_collaborators(&original)));

    tiers
}

/// Cut " feat. X", " ft. X", " featuring X" tails off an artist credit.
fn strip_collaborators(s: &str) -> &str {
    let lower = s.to_lowercase();
    for marker in [" feat.", " feat ", " ft.", " ft ", " featuring ", " vs.", " vs "] {
        if let Some(pos) = lower.find(marker)
            && s.is_char_boundary(pos)
        {
            return &s[..pos];
        }
    }
    s
}

fn push_variant(variants: &mut SmallVec<[String; 8]>, original: &str, candidate: String) {
    if variants.len() >= MAX_VARIANTS {
        return;
    }
    let candidate = candidate.trim().to_string();
    if candidate.is_empty() || candidate == original || variants.contains(&candidate) {
        return;
    }
    variants.push(candidate);
}

/// Collapse runs of the same letter to a single occurrence, word by word,
/// skipping words from the legitimate-doubles dictionary.
fn collapse_doubled_letters(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            if LEGITIMATE_DOUBLES.contains(&word.to_lowercase().as_str()) {
                word.to_string()
            } else {
                collapse_runs(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_runs(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut previous: Option<char> = None;
    for c in word.chars() {
        let repeated = c.is_alphabetic()
            && previous.is_some_and(|p| p.to_lowercase().eq(c.to_lowercase()));
        if !repeated {
            out.push(c);
        }
        previous = Some(c);
    }
    out
}

/// Re-apply the original's leading capital to a lowercased transform so
/// "Xtatic" maps to "Kstatic" rather than "kstatic".
fn match_leading_case(original: &str, transformed: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = transformed.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        transformed.to_string()
    }
}

/// Swap `from` for `to` wherever `from` directly precedes a vowel.
fn swap_c_k_before_vowel(lower: &str, from: char, to: char) -> String {
    let chars: Vec<char> = lower.chars().collect();
    let mut out = String::with_capacity(lower.len());
    for (i, &c) in chars.iter().enumerate() {
        let next_is_vowel = chars
            .get(i + 1)
            .is_some_and(|n| matches!(n, 'a' | 'e' | 'i' | 'o' | 'u'));
        if c == from && next_is_vowel {
            out.push(to);
        } else {
            out.push(c);
        }
    }
    out
}

fn swap_word_ending(lower: &str, from: &str, to: &str) -> String {
    lower
        .split_whitespace()
        .map(|word| {
            if word.len() > from.len() && word.ends_with(from) {
                format!("{}{}", &word[..word.len() - from.len()], to)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn replace_whole_word(s: &str, from: &str, to: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case(from) {
                to.to_string()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count maximal vowel runs as a cheap syllable proxy.
fn vowel_groups(s: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in s.to_lowercase().chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups
}

/// Split at an interior lowercase-to-uppercase boundary: "BaseMania" -> "Base Mania".
fn camel_case_split(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    for i in 1..chars.len() {
        if chars[i].is_uppercase() && chars[i - 1].is_lowercase() {
            let head: String = chars[..i].iter().collect();
            let tail: String = chars[i..].iter().collect();
            return Some(format!("{head} {tail}"));
        }
    }
    None
}

/// Split against the compound-word dictionary at either end:
/// "Basemania" -> "Base Mania".
fn dictionary_splits(s: &str) -> Vec<String> {
    let lower = s.to_lowercase();
    let mut splits = Vec::new();
    for &word in COMPOUND_WORDS {
        if lower.len() > word.len() + 2 {
            if lower.starts_with(word) {
                splits.push(capitalized_pair(&lower[..word.len()], &lower[word.len()..]));
            }
            if lower.ends_with(word) {
                let cut = lower.len() - word.len();
                splits.push(capitalized_pair(&lower[..cut], &lower[cut..]));
            }
        }
    }
    splits
}

fn capitalized_pair(head: &str, tail: &str) -> String {
    format!("{} {}", capitalize(head), capitalize(tail))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_letters_collapse() {
        assert!(fuzzy_variants("Twoo").contains(&"Two".to_string()));
        assert!(fuzzy_variants("Prodigyy").contains(&"Prodigy".to_string()));
    }

    #[test]
    fn dictionary_doubles_survive() {
        assert!(!fuzzy_variants("Good").contains(&"God".to_string()));
        assert!(!fuzzy_variants("Cool").contains(&"Col".to_string()));
    }

    #[test]
    fn phonetic_swaps() {
        assert!(fuzzy_variants("Phat Beats").contains(&"Fat beats".to_string()));
        assert!(fuzzy_variants("Trak").contains(&"Track".to_string()));
    }

    #[test]
    fn number_words_both_directions() {
        assert!(fuzzy_variants("Two Bad Mice").contains(&"2 Bad Mice".to_string()));
        assert!(fuzzy_variants("2 Unlimited").contains(&"two Unlimited".to_string()));
    }

    #[test]
    fn number_substitution_is_whole_word_only() {
        // "Someone" must not become "Some1".
        let variants = fuzzy_variants("Someone");
        assert!(!variants.iter().any(|v| v.contains('1')));
    }

    #[test]
    fn compound_dictionary_split() {
        assert!(fuzzy_variants("Basemania").contains(&"Base Mania".to_string()));
    }

    #[test]
    fn camel_case_split_variant() {
        assert!(fuzzy_variants("NightStorm").contains(&"Night Storm".to_string()));
    }

    #[test]
    fn no_split_for_multi_word_input() {
        assert!(!fuzzy_variants("Base Mania").iter().any(|v| v == "Base  Mania"));
    }

    #[test]
    fn variants_are_capped_and_unique() {
        let variants = fuzzy_variants("Checkck Two Phonic Xtatic Basemania");
        assert!(variants.len() <= 20);
        let mut deduped = variants.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), variants.len());
    }

    #[test]
    fn original_never_included() {
        assert!(!fuzzy_variants("Twoo").contains(&"Twoo".to_string()));
    }

    #[test]
    fn empty_input_no_variants() {
        assert!(fuzzy_variants("  ").is_empty());
    }

    #[test]
    fn artist_tiers_start_with_original() {
        let tiers = artist_name_tiers("The Prodigy");
        assert_eq!(tiers[0], "The Prodigy");
        assert!(tiers.contains(&"prodigy".to_string()));
    }

    #[test]
    fn artist_tiers_strip_collaborators() {
        let tiers = artist_name_tiers("Scooter feat. Vicky Leandros");
        assert!(tiers.contains(&"scooter".to_string()));
    }

    #[test]
    fn artist_tiers_deduplicate() {
        let tiers = artist_name_tiers("prodigy");
        let mut sorted = tiers.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), tiers.len());
    }
}
