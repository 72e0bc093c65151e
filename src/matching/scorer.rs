//! Relevance scoring of one candidate release against the original query.
//!
//! The score is an integer sum of an artist component, a title component,
//! bonuses, and one special case: the cross-field rescue, which recognizes
//! that the "artist" input was actually a release/compilation name sitting in
//! the candidate's title field (the classic "Release - Track" misparse).
//! Scores above 100 are possible and valid; nothing clamps the top end.

use super::domain::Candidate;
use crate::normalize::{
    extract_parenthesis_info, fuzzy_variants, normalize_artist, normalize_title,
    significant_words, string_similarity,
};

/// Artist component ceiling.
const ARTIST_MAX: f64 = 60.0;
/// Title component ceiling (before bonuses).
const TITLE_MAX: f64 = 30.0;
/// Flat bonus when the cross-field rescue fires.
const CROSS_FIELD_BONUS: f64 = 40.0;
/// Similarity at which the rescue fires.
const CROSS_FIELD_THRESHOLD: f64 = 0.8;

/// Score one candidate against the search artist/title. Unbounded above.
pub fn score_candidate(candidate: &Candidate, artist: &str, title: &str) -> i32 {
    let search_artist = normalize_artist(artist);
    let candidate_artist = normalize_artist(&candidate.artist);
    let artist_sim = artist_similarity(&search_artist, &candidate_artist);

    let base = extract_parenthesis_info(title).base;
    let search_base = normalize_title(&base);
    let candidate_title = normalize_title(&candidate.title);

    let mut title_points = title_points(&search_base, &candidate_title);
    let artist_points = artist_points(artist_sim);

    // Cross-field rescue: the "artist" input matches the candidate's title,
    // meaning the upstream parse put a release name in the artist slot.
    let rescue_sim = string_similarity(&search_artist, &candidate_title);
    let rescued = rescue_sim >= CROSS_FIELD_THRESHOLD;

    let mut total = if rescued {
        artist_points + title_points + CROSS_FIELD_BONUS
    } else {
        // Mismatch penalty: a weak artist match caps how much the title alone
        // can contribute. Short generic titles need even stronger backing.
        if artist_sim < 0.3 {
            title_points = title_points.min(3.0);
        } else if artist_sim < 0.5 {
            title_points = title_points.min(8.0);
        }
        if significant_words(&base).len() <= 2 && artist_sim < 0.6 {
            title_points = title_points.min(2.0);
        }
        artist_points + title_points
    };

    if candidate.year.is_some() {
        total += 2.0;
    }
    if candidate
        .release_type
        .as_deref()
        .is_some_and(|t| t.eq_ignore_ascii_case("master"))
    {
        total += 2.0;
    }
    if candidate.cover_present {
        total += 1.0;
    }
    if has_electronic_genre(candidate) {
        total += 3.0;
    }
    if artist_sim >= 0.7 && !search_base.is_empty() && candidate_title.contains(&search_base) {
        total += 5.0;
    }
    if artist_sim >= 0.85 {
        total += 5.0;
    }

    total.round() as i32
}

/// Artist similarity with a fuzzy-variant probe: when the direct comparison
/// is weak, every variant pair of both names is tried and the best kept, so a
/// corrected typo still earns the full artist component.
fn artist_similarity(search: &str, candidate: &str) -> f64 {
    let mut best = string_similarity(search, candidate);
    if best >= 0.7 || search.is_empty() || candidate.is_empty() {
        return best;
    }

    let mut search_forms = fuzzy_variants(search);
    search_forms.push(search.to_string());
    let mut candidate_forms = fuzzy_variants(candidate);
    candidate_forms.push(candidate.to_string());

    for a in &search_forms {
        for b in &candidate_forms {
            let sim = string_similarity(&a.to_lowercase(), &b.to_lowercase());
            if sim > best {
                best = sim;
            }
        }
    }
    best
}

fn artist_points(similarity: f64) -> f64 {
    match similarity {
        s if s >= 0.85 => ARTIST_MAX,
        s if s >= 0.7 => 50.0,
        s if s >= 0.5 => 30.0,
        s if s >= 0.4 => 15.0,
        s if s >= 0.3 => 5.0,
        _ => 0.0,
    }
}

fn title_points(search_base: &str, candidate_title: &str) -> f64 {
    if search_base.is_empty() || candidate_title.is_empty() {
        return 0.0;
    }
    if search_base == candidate_title {
        return TITLE_MAX;
    }
    if candidate_title.contains(search_base) {
        return 25.0;
    }
    if search_base.contains(candidate_title) {
        return 20.0;
    }

    let search_words = significant_words(search_base);
    if search_words.is_empty() {
        return 0.0;
    }
    let matched = search_words
        .iter()
        .filter(|w| candidate_title.split_whitespace().any(|c| c == w.as_str()))
        .count();
    matched as f64 / search_words.len() as f64 * 15.0
}

/// Genres/styles that mark the catalogs this matcher was tuned on.
const ELECTRONIC_GENRES: &[&str] = &[
    "acid",
    "ambient",
    "big beat",
    "breakbeat",
    "breaks",
    "dance",
    "downtempo",
    "drum & bass",
    "drum and bass",
    "dubstep",
    "edm",
    "electro",
    "electronic",
    "eurodance",
    "gabber",
    "garage",
    "happy hardcore",
    "hard house",
    "hard trance",
    "hardcore",
    "hardstyle",
    "house",
    "idm",
    "jungle",
    "makina",
    "progressive house",
    "psy-trance",
    "rave",
    "techno",
    "trance",
    "uk garage",
];

fn has_electronic_genre(candidate: &Candidate) -> bool {
    candidate
        .genres
        .iter()
        .chain(candidate.styles.iter())
        .any(|g| ELECTRONIC_GENRES.contains(&g.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::ProviderId;

    fn candidate(artist: &str, title: &str) -> Candidate {
        Candidate {
            id: "1".to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            year: None,
            release_type: None,
            source: ProviderId::Discogs,
            cover_present: false,
            genres: vec![],
            styles: vec![],
            tracklist: None,
            score: 0,
        }
    }

    #[test]
    fn near_exact_match_scores_high() {
        let score = score_candidate(&candidate("The Prodigy", "Breathe"), "Prodigy", "Breathe");
        assert!(score >= 90, "got {score}");
    }

    #[test]
    fn cross_field_rescue_fires() {
        let cand = candidate("", "Bases EP Parte 1");
        let score = score_candidate(&cand, "Bases EP Parte 1", "Dynamite");
        // Flat +40, no mismatch cap: the rescue dominates an otherwise
        // zero-artist, zero-title comparison.
        assert!(score >= 40, "got {score}");
    }

    #[test]
    fn mismatch_penalty_caps_title_points() {
        // Same title, unrelated artist: without the cap this would be 30+.
        let score = score_candidate(
            &candidate("Completely Unrelated Name", "Hardcore Vibes Anthem Part Two"),
            "Zzqx",
            "Hardcore Vibes Anthem Part Two",
        );
        assert!(score <= 5, "got {score}");
    }

    #[test]
    fn short_generic_title_needs_artist_confirmation() {
        let with_artist = score_candidate(&candidate("Dune", "Rainbow"), "Dune", "Rainbow");
        let without_artist = score_candidate(&candidate("Somebody Else", "Rainbow"), "Dune", "Rainbow");
        assert!(with_artist >= 90);
        assert!(without_artist <= 5, "got {without_artist}");
    }

    #[test]
    fn typo_corrected_artist_earns_full_component() {
        // "Produgy" vs "Prodigy": direct similarity is below 0.85 but the
        // fuzzy probe should close most of the gap.
        let score = score_candidate(&candidate("The Prodigy", "Breathe"), "Prodigy", "Breathe");
        let typo = score_candidate(&candidate("The Prodigy", "Breathe"), "Prodigyy", "Breathe");
        assert!(typo >= score - 10, "typo {typo} vs clean {score}");
    }

    #[test]
    fn bonuses_accumulate() {
        let mut cand = candidate("The Prodigy", "Breathe");
        let plain = score_candidate(&cand, "Prodigy", "Breathe");

        cand.year = Some(1996);
        cand.release_type = Some("master".to_string());
        cand.cover_present = true;
        cand.genres = vec!["Electronic".to_string()];
        let decorated = score_candidate(&cand, "Prodigy", "Breathe");

        assert_eq!(decorated, plain + 8);
    }

    #[test]
    fn scores_can_exceed_one_hundred() {
        let mut cand = candidate("The Prodigy", "Breathe");
        cand.year = Some(1996);
        cand.release_type = Some("master".to_string());
        cand.cover_present = true;
        cand.styles = vec!["Big Beat".to_string()];
        let score = score_candidate(&cand, "Prodigy", "Breathe");
        assert!(score > 100, "got {score}");
    }

    #[test]
    fn base_title_comparison_ignores_mix_info() {
        let score = score_candidate(
            &candidate("The Prodigy", "Breathe"),
            "Prodigy",
            "Breathe (Edit)",
        );
        assert!(score >= 90, "got {score}");
    }

    #[test]
    fn word_overlap_fallback() {
        let cand = candidate("The Prodigy", "Music for the Jilted Generation");
        let score = score_candidate(&cand, "Prodigy", "Jilted Generation Anthems");
        // Partial overlap: more than the floor, less than containment.
        assert!(score > 60 && score < 90, "got {score}");
    }
}
