//! Heuristics for telling real tag values apart from raw filenames,
//! plus mojibake detection for corrupted source metadata.
//!
//! Upload pipelines routinely stuff the whole filename into the title tag:
//! `"01. Dune - Hardcore Vibes (A2 Vinyl 1995).mp3"` is not a title. The
//! checks here are ordered from cheapest to most specific; the first hit
//! classifies the value as a filename.

use std::sync::LazyLock;

use regex::Regex;

/// Tag values longer than this are assumed to be pasted filenames/paths.
const MAX_REASONABLE_TAG_LEN: usize = 80;

/// Long digit runs: rip IDs, catalog numbers, YouTube-style suffixes.
static NUMERIC_ID_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{5,}").unwrap());

/// Vinyl side/position codes as their own token: "A1", "B2", "C12".
static VINYL_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-D]\d{1,2}\b").unwrap());

/// Leading track-number prefixes: "01 - ", "7. ", "03_". A punctuation
/// separator is required so numeric artist names ("2 Unlimited") survive.
static TRACK_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\s*[._-]+\s*\S").unwrap());

/// A single "Word - Word" split, the classic "Artist - Title" filename shape.
static DUAL_STRUCTURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^-]*\w[^-]*\s-\s[^-]*\w[^-]*$").unwrap());

/// Mojibake artifacts: the replacement character, and UTF-8-read-as-Latin-1
/// lead bytes followed by a Latin-1 supplement symbol (the "Ã©"/"â€™" class).
static MOJIBAKE_ARTIFACTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{FFFD}|[\u{00C3}\u{00C2}][\u{0080}-\u{00BF}]|\u{00E2}\u{20AC}").unwrap()
});

/// Ordered heuristic classification of a tag value as a raw filename.
pub fn looks_like_filename(tag: &str) -> bool {
    let tag = tag.trim();

    if tag.chars().count() > MAX_REASONABLE_TAG_LEN {
        return true;
    }
    if NUMERIC_ID_CODE.is_match(tag) {
        return true;
    }
    if VINYL_POSITION.is_match(tag) {
        return true;
    }
    if tag.matches(" - ").count() >= 2 {
        return true;
    }
    if TRACK_NUMBER_PREFIX.is_match(tag) {
        return true;
    }
    if DUAL_STRUCTURE.is_match(tag) {
        return true;
    }
    false
}

/// A usable tag value: non-empty, at least two characters, and not a
/// filename in disguise.
pub fn is_valid_tag(tag: &str) -> bool {
    let tag = tag.trim();
    tag.chars().count() >= 2 && !looks_like_filename(tag)
}

/// Does the text carry Unicode mojibake artifacts from a bad encoding
/// round-trip?
pub fn contains_mojibake(s: &str) -> bool {
    MOJIBAKE_ARTIFACTS.is_match(s)
}

static FILENAME_TRACK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:track\s*)?\d{1,3}\s*[._-]+\s*").unwrap());

static FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp3|flac|wav|m4a|aac|ogg|wma|aiff?)$").unwrap());

/// Derive an (artist, title) pair from a filename stem of the shape
/// `"NN. Artist - Title"` / `"Artist - Title.mp3"`.
///
/// Returns `None` when the stem has no `" - "` split, in which case the whole
/// cleaned stem is best treated as a title by the caller.
pub fn split_artist_title(stem: &str) -> Option<(String, String)> {
    let mut cleaned = FILE_EXTENSION.replace(stem.trim(), "").to_string();
    cleaned = FILENAME_TRACK_PREFIX.replace(&cleaned, "").to_string();

    let (artist, title) = cleaned.split_once(" - ")?;
    let artist = artist.trim();
    let title = title.trim();
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    Some((artist.to_string(), title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_tags_pass() {
        assert!(!looks_like_filename("Breathe"));
        assert!(!looks_like_filename("Smack My Bitch Up"));
        assert!(!looks_like_filename("Hardcore Vibes (Radio Edit)"));
    }

    #[test]
    fn overlong_values_are_filenames() {
        let long = "x".repeat(81);
        assert!(looks_like_filename(&long));
    }

    #[test]
    fn numeric_id_codes_are_filenames() {
        assert!(looks_like_filename("Hardcore Vibes 174839201"));
    }

    #[test]
    fn vinyl_positions_are_filenames() {
        assert!(looks_like_filename("A1 Hardcore Vibes"));
        assert!(looks_like_filename("Dune B2 Vibes"));
    }

    #[test]
    fn repeated_separators_are_filenames() {
        assert!(looks_like_filename("Dune - Hardcore Vibes - 1995"));
    }

    #[test]
    fn track_number_prefixes_are_filenames() {
        assert!(looks_like_filename("01 - Hardcore Vibes"));
        assert!(looks_like_filename("7. Hardcore Vibes"));
    }

    #[test]
    fn dual_structure_is_a_filename() {
        assert!(looks_like_filename("Dune - Hardcore Vibes"));
    }

    #[test]
    fn valid_tag_rules() {
        assert!(is_valid_tag("Breathe"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("x"));
        assert!(!is_valid_tag("Dune - Hardcore Vibes"));
    }

    #[test]
    fn mojibake_detected() {
        assert!(contains_mojibake("Mot\u{00C3}\u{00B6}rhead"));
        assert!(contains_mojibake("bad \u{FFFD} tag"));
        assert!(contains_mojibake("don\u{00E2}\u{20AC}\u{2122}t"));
    }

    #[test]
    fn real_diacritics_are_not_mojibake() {
        assert!(!contains_mojibake("Motörhead"));
        assert!(!contains_mojibake("Beyoncé"));
        assert!(!contains_mojibake("JOÃO GILBERTO"));
    }

    #[test]
    fn stem_split() {
        assert_eq!(
            split_artist_title("03. Dune - Hardcore Vibes.mp3"),
            Some(("Dune".to_string(), "Hardcore Vibes".to_string()))
        );
        assert_eq!(
            split_artist_title("Dune - Hardcore Vibes"),
            Some(("Dune".to_string(), "Hardcore Vibes".to_string()))
        );
    }

    #[test]
    fn stem_without_separator_does_not_split() {
        assert_eq!(split_artist_title("Hardcore Vibes"), None);
    }
}
