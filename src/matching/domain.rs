//! Internal domain models for the search-and-rank engine.
//!
//! These types are OUR types - provider response shapes get converted into
//! them by the per-provider adapters and nothing outside those adapters ever
//! sees a wire format. Everything here is created fresh per search call and
//! dropped once the ranked result is returned.

use std::fmt;

use serde::Serialize;

/// Identifies the catalog a strategy is aimed at / a candidate came from.
///
/// Candidate ids are only unique within one provider's namespace, so this id
/// is part of every dedup key. Cross-provider dedup is not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Discogs,
    MusicBrainz,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discogs => write!(f, "discogs"),
            Self::MusicBrainz => write!(f, "musicbrainz"),
        }
    }
}

/// The shape of one search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Plain release search by artist/title fields.
    Release,
    /// Track-scoped search.
    Track,
    /// Free-text query; the literal query string is carried in `title`.
    Query,
    /// Field-scoped search with the inputs exactly as given.
    Exact,
    /// Typo-fix tier: built from fuzzy-corrected artist variants.
    Fuzzy,
    /// Artist and title transposed, recovering "Release - Track" misparses.
    Swap,
}

/// Which release universe a strategy searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Master,
    Release,
    All,
}

/// One parametrized query attempt against one provider.
///
/// `priority` is assigned once at generation time (`priority = build index`)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStrategy {
    pub kind: StrategyKind,
    pub artist: String,
    pub title: String,
    pub mode: SearchMode,
    pub description: &'static str,
    pub priority: usize,
    pub source: ProviderId,
}

impl SearchStrategy {
    /// The five-field identity used for deduplication.
    pub fn dedup_key(&self) -> (StrategyKind, String, String, SearchMode, ProviderId) {
        (
            self.kind,
            self.artist.clone(),
            self.title.clone(),
            self.mode,
            self.source,
        )
    }

    /// Whether this strategy belongs to the droppable typo-fix tier.
    pub fn is_typo_fix(&self) -> bool {
        self.kind == StrategyKind::Fuzzy
    }
}

/// A release record returned by a provider, annotated with its relevance
/// score once the orchestrator has seen it.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Provider-scoped identifier.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: Option<u16>,
    /// Provider record type ("master", "release", ...).
    pub release_type: Option<String>,
    pub source: ProviderId,
    pub cover_present: bool,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracklist: Option<Vec<TrackCandidate>>,
    pub score: i32,
}

/// One entry of a release's tracklist.
///
/// An empty `position` marks a non-track entry (section heading) and is
/// excluded from matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackCandidate {
    pub position: String,
    pub title: String,
    pub duration_secs: Option<u32>,
    pub artists: Vec<String>,
}

impl TrackCandidate {
    pub fn is_heading(&self) -> bool {
        self.position.trim().is_empty() || self.title.trim().is_empty()
    }
}

/// A tracklist entry with its match score against the searched title.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTrack {
    pub track: TrackCandidate,
    pub score: i32,
    pub breakdown: TrackScoreBreakdown,
}

/// How a track's score decomposes, for logging and display.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TrackScoreBreakdown {
    pub title_score: i32,
    pub version_score: i32,
    pub duration_score: i32,
}

/// The noisy input one search call starts from.
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    pub artist: String,
    pub title: String,
    /// Original filename, used to re-derive artist/title when the tags are
    /// unusable.
    pub filename_hint: Option<String>,
    pub duration_secs: Option<u32>,
    /// Confidence reported by an upstream identification (0.0 - 1.0). High
    /// confidence drops the typo-fix strategy tier.
    pub external_confidence: Option<f64>,
}

/// Errors a provider call can fail with. All of them degrade to an empty
/// result set for that strategy; none abort a batch or a run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("request timed out")]
    Timeout,
}
