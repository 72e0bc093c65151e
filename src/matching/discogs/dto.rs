//! Discogs API response shapes.
//!
//! These structs mirror the wire format exactly and contain no logic.
//! See: https://www.discogs.com/developers/#page:database
//!
//! If Discogs changes their response format, only this file and adapter.rs
//! need to change.

use serde::Deserialize;

/// Response of `GET /database/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub items: u64,
}

/// One search hit. `title` arrives as a combined "Artist - Title" string.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    /// Record type: "master", "release", "artist", "label".
    #[serde(rename = "type", default)]
    pub kind: String,
    pub year: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    pub thumb: Option<String>,
    pub cover_image: Option<String>,
    pub catno: Option<String>,
}

/// Response of `GET /releases/{id}`, reduced to what the engine consumes.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub id: u64,
    pub title: String,
    pub year: Option<u16>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// One tracklist row. Heading rows carry `type_: "heading"` and no position.
#[derive(Debug, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub position: String,
    #[serde(rename = "type_", default)]
    pub kind: String,
    pub title: String,
    /// "MM:SS" (or "H:MM:SS"), possibly empty.
    pub duration: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// Error body Discogs returns for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_parses() {
        let json = r#"{
            "pagination": {"page": 1, "pages": 1, "items": 2},
            "results": [
                {
                    "id": 132904,
                    "type": "release",
                    "title": "Dune - Hardcore Vibes",
                    "year": "1995",
                    "country": "Germany",
                    "genre": ["Electronic"],
                    "style": ["Happy Hardcore", "Trance"],
                    "thumb": "https://i.discogs.com/thumb.jpg",
                    "cover_image": "https://i.discogs.com/cover.jpg",
                    "catno": "DST 1148-8"
                },
                {
                    "id": 5150,
                    "type": "master",
                    "title": "Dune - Expedicion"
                }
            ]
        }"#;

        let parsed: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].id, 132904);
        assert_eq!(parsed.results[0].year.as_deref(), Some("1995"));
        assert_eq!(parsed.results[1].kind, "master");
        assert!(parsed.results[1].genre.is_empty());
        assert_eq!(parsed.pagination.as_ref().unwrap().items, 2);
    }

    #[test]
    fn release_response_parses() {
        let json = r#"{
            "id": 132904,
            "title": "Expedicion",
            "year": 1996,
            "artists": [{"name": "Dune"}],
            "tracklist": [
                {"position": "", "type_": "heading", "title": "Part One", "duration": ""},
                {"position": "1", "type_": "track", "title": "Hardcore Vibes", "duration": "3:35"},
                {"position": "2", "type_": "track", "title": "Rainbow to the Stars", "duration": "3:50",
                 "artists": [{"name": "Dune"}]}
            ]
        }"#;

        let parsed: Release = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tracklist.len(), 3);
        assert_eq!(parsed.tracklist[0].kind, "heading");
        assert_eq!(parsed.tracklist[1].duration.as_deref(), Some("3:35"));
        assert_eq!(parsed.artists[0].name, "Dune");
    }

    #[test]
    fn minimal_result_parses_with_defaults() {
        let json = r#"{"results": [{"id": 7, "title": "X - Y"}]}"#;
        let parsed: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results[0].kind, "");
        assert!(parsed.results[0].style.is_empty());
    }
}
