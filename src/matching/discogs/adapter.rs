//! Adapter layer: convert between Discogs DTOs and domain models.
//!
//! This is the ONLY place where Discogs wire shapes meet engine types.
//! Strategy fields map onto query parameters here, and search hits become
//! [`Candidate`]s with their combined "Artist - Title" string split apart.

use super::dto;
use crate::matching::domain::{
    Candidate, ProviderId, SearchMode, SearchStrategy, StrategyKind, TrackCandidate,
};

/// Translate a strategy into `GET /database/search` query parameters.
///
/// The mapping follows the strategy's field shape: combined free text goes
/// into `q`, field-scoped searches use `artist`/`track`, and the search mode
/// narrows the record type.
pub fn to_params(strategy: &SearchStrategy) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = Vec::with_capacity(3);

    let artist = strategy.artist.trim();
    let title = strategy.title.trim();

    if artist.is_empty() {
        if matches!(strategy.kind, StrategyKind::Track) {
            params.push(("track", title.to_string()));
        } else if !title.is_empty() {
            params.push(("q", title.to_string()));
        }
    } else if title.is_empty() {
        params.push(("artist", artist.to_string()));
    } else {
        params.push(("artist", artist.to_string()));
        params.push(("track", title.to_string()));
    }

    match strategy.mode {
        SearchMode::Master => params.push(("type", "master".to_string())),
        SearchMode::Release => params.push(("type", "release".to_string())),
        SearchMode::All => {}
    }

    params
}

/// Convert one search hit into a candidate. The relevance score is filled in
/// later by the orchestrator.
pub fn to_candidate(result: dto::SearchResult) -> Candidate {
    let (artist, title) = split_combined_title(&result.title);
    let cover_present = result
        .cover_image
        .as_deref()
        .or(result.thumb.as_deref())
        .is_some_and(|url| !url.is_empty());

    Candidate {
        id: result.id.to_string(),
        title,
        artist,
        year: result.year.as_deref().and_then(|y| y.parse().ok()),
        release_type: (!result.kind.is_empty()).then_some(result.kind),
        source: ProviderId::Discogs,
        cover_present,
        genres: result.genre,
        styles: result.style,
        tracklist: None,
        score: 0,
    }
}

/// Convert a release's tracklist. Heading rows keep their empty position so
/// the matcher can exclude them.
pub fn to_tracks(release: dto::Release) -> Vec<TrackCandidate> {
    release
        .tracklist
        .into_iter()
        .map(|track| {
            let position = if track.kind == "heading" {
                String::new()
            } else {
                track.position
            };
            TrackCandidate {
                position,
                title: track.title,
                duration_secs: track.duration.as_deref().and_then(parse_duration),
                artists: track.artists.into_iter().map(|a| a.name).collect(),
            }
        })
        .collect()
}

/// Discogs search hits carry "Artist - Title"; split once at the first
/// separator. Artist-less records (compilations) come back title-only.
fn split_combined_title(combined: &str) -> (String, String) {
    match combined.split_once(" - ") {
        Some((artist, title)) => (artist.trim().to_string(), title.trim().to_string()),
        None => (String::new(), combined.trim().to_string()),
    }
}

/// Parse "MM:SS" / "H:MM:SS" durations into seconds.
fn parse_duration(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut seconds: u32 = 0;
    for part in text.split(':') {
        let value: u32 = part.trim().parse().ok()?;
        seconds = seconds.checked_mul(60)?.checked_add(value)?;
    }
    Some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(
        kind: StrategyKind,
        artist: &str,
        title: &str,
        mode: SearchMode,
    ) -> SearchStrategy {
        SearchStrategy {
            kind,
            artist: artist.to_string(),
            title: title.to_string(),
            mode,
            description: "test",
            priority: 0,
            source: ProviderId::Discogs,
        }
    }

    #[test]
    fn query_strategies_use_free_text() {
        let params = to_params(&strategy(
            StrategyKind::Query,
            "",
            "Dune - Hardcore Vibes",
            SearchMode::All,
        ));
        assert_eq!(params, vec![("q", "Dune - Hardcore Vibes".to_string())]);
    }

    #[test]
    fn field_strategies_use_artist_and_track() {
        let params = to_params(&strategy(
            StrategyKind::Exact,
            "Dune",
            "Hardcore Vibes",
            SearchMode::Master,
        ));
        assert_eq!(
            params,
            vec![
                ("artist", "Dune".to_string()),
                ("track", "Hardcore Vibes".to_string()),
                ("type", "master".to_string()),
            ]
        );
    }

    #[test]
    fn artist_only_strategies() {
        let params = to_params(&strategy(
            StrategyKind::Release,
            "Dune",
            "",
            SearchMode::Master,
        ));
        assert_eq!(
            params,
            vec![
                ("artist", "Dune".to_string()),
                ("type", "master".to_string()),
            ]
        );
    }

    #[test]
    fn title_only_track_strategy() {
        let params = to_params(&strategy(
            StrategyKind::Track,
            "",
            "Hardcore Vibes",
            SearchMode::All,
        ));
        assert_eq!(params, vec![("track", "Hardcore Vibes".to_string())]);
    }

    #[test]
    fn candidate_conversion_splits_combined_title() {
        let result = dto::SearchResult {
            id: 132904,
            title: "Dune - Hardcore Vibes".to_string(),
            kind: "release".to_string(),
            year: Some("1995".to_string()),
            country: None,
            genre: vec!["Electronic".to_string()],
            style: vec!["Happy Hardcore".to_string()],
            thumb: None,
            cover_image: Some("https://i.discogs.com/cover.jpg".to_string()),
            catno: None,
        };

        let candidate = to_candidate(result);
        assert_eq!(candidate.id, "132904");
        assert_eq!(candidate.artist, "Dune");
        assert_eq!(candidate.title, "Hardcore Vibes");
        assert_eq!(candidate.year, Some(1995));
        assert!(candidate.cover_present);
        assert_eq!(candidate.source, ProviderId::Discogs);
    }

    #[test]
    fn title_without_separator_has_no_artist() {
        let (artist, title) = split_combined_title("Bases EP Parte 1");
        assert!(artist.is_empty());
        assert_eq!(title, "Bases EP Parte 1");
    }

    #[test]
    fn unparseable_year_is_dropped() {
        let result = dto::SearchResult {
            id: 7,
            title: "X - Y".to_string(),
            kind: String::new(),
            year: Some("19XX".to_string()),
            country: None,
            genre: vec![],
            style: vec![],
            thumb: None,
            cover_image: None,
            catno: None,
        };
        assert_eq!(to_candidate(result).year, None);
    }

    #[test]
    fn tracklist_conversion_marks_headings() {
        let release = dto::Release {
            id: 1,
            title: "Expedicion".to_string(),
            year: Some(1996),
            artists: vec![],
            tracklist: vec![
                dto::Track {
                    position: "Part One".to_string(),
                    kind: "heading".to_string(),
                    title: "Part One".to_string(),
                    duration: None,
                    artists: vec![],
                },
                dto::Track {
                    position: "1".to_string(),
                    kind: "track".to_string(),
                    title: "Hardcore Vibes".to_string(),
                    duration: Some("3:35".to_string()),
                    artists: vec![],
                },
            ],
        };

        let tracks = to_tracks(release);
        assert!(tracks[0].is_heading());
        assert_eq!(tracks[1].duration_secs, Some(215));
    }

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_duration("3:35"), Some(215));
        assert_eq!(parse_duration("1:02:03"), Some(3723));
        assert_eq!(parse_duration("45"), Some(45));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("n/a"), None);
    }
}
