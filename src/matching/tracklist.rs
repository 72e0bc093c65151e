//! Matching the file's title against a chosen release's tracklist.
//!
//! Unlike release scoring, this comparison cares about the trailing
//! parenthetical: "(Club Mix)" vs "(Radio Edit)" is the difference between
//! the right and wrong track on a remix EP, so version info gets its own
//! sub-score with real penalties for one-sided version tags.

use tracing::debug;

use super::domain::{RankedTrack, TrackCandidate, TrackScoreBreakdown};
use crate::normalize::{extract_parenthesis_info, normalize_title, string_similarity};

/// Minimum total for a normal-orientation winner to be selected.
const SELECTION_FLOOR: i32 = 30;
/// Minimum total for the swapped orientation to be considered at all.
const SWAP_FLOOR: i32 = 20;

/// Rank every real track of a tracklist against the searched title,
/// best first.
///
/// Section headings are excluded up front. When the artist and title may
/// have been transposed upstream, the swapped orientation (parenthesis info
/// taken from the `artist` field) is also tried; its ranking replaces the
/// normal one when its top score is higher and clears [`SWAP_FLOOR`].
pub fn rank_tracks(
    artist: &str,
    title: &str,
    duration_secs: Option<u32>,
    tracklist: &[TrackCandidate],
) -> Vec<RankedTrack> {
    let real: Vec<&TrackCandidate> = tracklist.iter().filter(|t| !t.is_heading()).collect();
    if real.is_empty() {
        return Vec::new();
    }

    let normal = rank_orientation(title, duration_secs, &real);

    let artist = artist.trim();
    if artist.is_empty() || artist == title.trim() {
        return normal;
    }

    let swapped = rank_orientation(artist, duration_secs, &real);
    let normal_top = normal.first().map_or(i32::MIN, |r| r.score);
    let swapped_top = swapped.first().map_or(i32::MIN, |r| r.score);
    if swapped_top > normal_top && swapped_top > SWAP_FLOOR {
        debug!(
            normal_top,
            swapped_top, "using swapped artist/title orientation for track match"
        );
        swapped
    } else {
        normal
    }
}

/// Pick the matching track, or `None` when no candidate is confident enough.
///
/// A tracklist with exactly one real track is selected unconditionally. An
/// unselected track is a normal outcome, not an error.
pub fn select_track(
    artist: &str,
    title: &str,
    duration_secs: Option<u32>,
    tracklist: &[TrackCandidate],
) -> Option<RankedTrack> {
    let real: Vec<&TrackCandidate> = tracklist.iter().filter(|t| !t.is_heading()).collect();
    if real.is_empty() {
        return None;
    }
    if real.len() == 1 {
        // The only track on the release is the track, whatever it scores.
        return rank_orientation(title, duration_secs, &real).into_iter().next();
    }

    let normal = rank_orientation(title, duration_secs, &real);
    let normal_best = normal.into_iter().next();

    let artist = artist.trim();
    if !artist.is_empty() && artist != title.trim() {
        let swapped_best = rank_orientation(artist, duration_secs, &real)
            .into_iter()
            .next();
        if let Some(swapped) = swapped_best {
            let normal_top = normal_best.as_ref().map_or(i32::MIN, |r| r.score);
            if swapped.score > normal_top && swapped.score > SWAP_FLOOR {
                return Some(swapped);
            }
        }
    }

    normal_best.filter(|best| best.score >= SELECTION_FLOOR)
}

/// Score all tracks against one (base, mix) reading of the search input.
fn rank_orientation(
    search: &str,
    duration_secs: Option<u32>,
    tracks: &[&TrackCandidate],
) -> Vec<RankedTrack> {
    let info = extract_parenthesis_info(search);
    let search_base = normalize_title(&info.base);
    let search_mix = info
        .mix_info
        .map(|m| normalize_title(&m))
        .filter(|m| !m.is_empty());

    let mut ranked: Vec<RankedTrack> = tracks
        .iter()
        .map(|track| {
            let breakdown = score_track(&search_base, search_mix.as_deref(), duration_secs, track);
            RankedTrack {
                track: (*track).clone(),
                score: breakdown.title_score + breakdown.version_score + breakdown.duration_score,
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn score_track(
    search_base: &str,
    search_mix: Option<&str>,
    duration_secs: Option<u32>,
    track: &TrackCandidate,
) -> TrackScoreBreakdown {
    let info = extract_parenthesis_info(&track.title);
    let track_base = normalize_title(&info.base);
    let track_mix = info
        .mix_info
        .map(|m| normalize_title(&m))
        .filter(|m| !m.is_empty());

    TrackScoreBreakdown {
        title_score: title_score(search_base, &track_base),
        version_score: version_score(search_mix, track_mix.as_deref()),
        duration_score: duration_score(duration_secs, track.duration_secs),
    }
}

fn title_score(search_base: &str, track_base: &str) -> i32 {
    if search_base.is_empty() || track_base.is_empty() {
        return 0;
    }
    if search_base == track_base {
        return 40;
    }
    if search_base.contains(track_base) || track_base.contains(search_base) {
        return 30;
    }
    (string_similarity(search_base, track_base) * 25.0).round() as i32
}

fn version_score(search_mix: Option<&str>, track_mix: Option<&str>) -> i32 {
    match (search_mix, track_mix) {
        (Some(search), Some(track)) => {
            if search == track {
                50
            } else if search.contains(track) || track.contains(search) {
                40
            } else {
                let sim = string_similarity(search, track);
                if sim > 0.5 {
                    (sim * 30.0).round() as i32
                } else {
                    0
                }
            }
        }
        (Some(_), None) => -10,
        (None, Some(_)) => -5,
        (None, None) => 0,
    }
}

fn duration_score(search: Option<u32>, track: Option<u32>) -> i32 {
    let (Some(search), Some(track)) = (search, track) else {
        return 0;
    };
    match search.abs_diff(track) {
        0..=3 => 10,
        4..=10 => 7,
        11..=20 => 4,
        21..=30 => 2,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(position: &str, title: &str, duration_secs: Option<u32>) -> TrackCandidate {
        TrackCandidate {
            position: position.to_string(),
            title: title.to_string(),
            duration_secs,
            artists: vec![],
        }
    }

    fn heading(title: &str) -> TrackCandidate {
        TrackCandidate {
            position: String::new(),
            title: title.to_string(),
            duration_secs: None,
            artists: vec![],
        }
    }

    #[test]
    fn single_real_track_is_always_selected() {
        let tracklist = vec![heading("Side A"), track("A1", "Totally Different", None)];
        let selected = select_track("Dune", "Hardcore Vibes", None, &tracklist)
            .expect("sole track selected");
        assert_eq!(selected.track.title, "Totally Different");
    }

    #[test]
    fn headings_are_excluded() {
        let tracklist = vec![
            heading("Disc One"),
            track("1", "Breathe", Some(215)),
            track("2", "Firestarter", Some(281)),
        ];
        let ranked = rank_tracks("The Prodigy", "Breathe", None, &tracklist);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].track.title, "Breathe");
    }

    #[test]
    fn exact_title_outranks_similar() {
        let tracklist = vec![
            track("1", "Hardcore Vibes", Some(210)),
            track("2", "Hardcore Vibes (Trip Mix)", Some(260)),
        ];
        let ranked = rank_tracks("Dune", "Hardcore Vibes", None, &tracklist);
        assert_eq!(ranked[0].track.position, "1");
        // The plain track has no one-sided version penalty; the mix does.
        assert_eq!(ranked[1].breakdown.version_score, -5);
    }

    #[test]
    fn version_info_selects_the_right_mix() {
        let tracklist = vec![
            track("1", "Hardcore Vibes (Radio Edit)", Some(210)),
            track("2", "Hardcore Vibes (Trip Mix)", Some(260)),
        ];
        let ranked = rank_tracks("Dune", "Hardcore Vibes (Trip Mix)", None, &tracklist);
        assert_eq!(ranked[0].track.position, "2");
        assert_eq!(ranked[0].breakdown.version_score, 50);
    }

    #[test]
    fn duration_buckets() {
        assert_eq!(duration_score(Some(215), Some(215)), 10);
        assert_eq!(duration_score(Some(215), Some(218)), 10);
        assert_eq!(duration_score(Some(215), Some(224)), 7);
        assert_eq!(duration_score(Some(215), Some(230)), 4);
        assert_eq!(duration_score(Some(215), Some(244)), 2);
        assert_eq!(duration_score(Some(215), Some(246)), 0);
        assert_eq!(duration_score(None, Some(215)), 0);
        assert_eq!(duration_score(Some(215), None), 0);
    }

    #[test]
    fn exact_duration_earns_full_bonus() {
        let tracklist = vec![
            track("1", "Hardcore Vibes", Some(215)),
            track("2", "Rainbow to the Stars", Some(230)),
        ];
        let ranked = rank_tracks("Dune", "Hardcore Vibes", Some(215), &tracklist);
        assert_eq!(ranked[0].breakdown.duration_score, 10);
    }

    #[test]
    fn thirty_one_second_gap_scores_zero() {
        assert_eq!(duration_score(Some(200), Some(231)), 0);
    }

    #[test]
    fn low_confidence_yields_no_selection() {
        let tracklist = vec![
            track("1", "Completely Unrelated", None),
            track("2", "Also Unrelated", None),
        ];
        let selected = select_track("Dune", "Hardcore Vibes", None, &tracklist);
        assert!(selected.is_none());
    }

    #[test]
    fn swapped_orientation_recovers_transposed_input() {
        // Upstream misparse: artist holds the track name, title holds the
        // release name.
        let tracklist = vec![
            track("1", "Hardcore Vibes", None),
            track("2", "Rainbow to the Stars", None),
        ];
        let selected = select_track("Hardcore Vibes", "Expedicion", None, &tracklist)
            .expect("swapped orientation match");
        assert_eq!(selected.track.title, "Hardcore Vibes");
    }

    #[test]
    fn empty_tracklist_yields_nothing() {
        assert!(rank_tracks("Dune", "Hardcore Vibes", None, &[]).is_empty());
        assert!(select_track("Dune", "Hardcore Vibes", None, &[heading("Side A")]).is_none());
    }

    #[test]
    fn rank_is_descending() {
        let tracklist = vec![
            track("1", "Rainbow to the Stars", None),
            track("2", "Hardcore Vibes", None),
            track("3", "Hand in Hand", None),
        ];
        let ranked = rank_tracks("Dune", "Hardcore Vibes", None, &tracklist);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
