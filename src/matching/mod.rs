//! The multi-strategy fuzzy search-and-rank engine.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - the engine's own types; no wire format
//!   ever leaks past the adapters
//! - **Strategy generation** (`strategy.rs`) - one noisy (artist, title) pair
//!   fans out into an ordered, deduplicated set of search attempts
//! - **Orchestration** (`orchestrator.rs`) - rate-limited concurrent batches
//!   with early stopping
//! - **Scoring** (`scorer.rs`) - relevance of one candidate release against
//!   the original query
//! - **Track matching** (`tracklist.rs`) - picking the right track inside a
//!   chosen release
//! - **Providers** (`discogs/`) - thin per-source translators behind the
//!   [`ProviderAdapter`] trait
//!
//! The pure pieces (strategy generation, scoring, track matching) are
//! stateless and safe to call concurrently. Only the orchestrator sequences
//! work, and it touches its candidate set at a single point after each batch
//! joins.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tunehound::matching::{DiscogsClient, MatchQuery, SearchConfig, SearchOrchestrator};
//!
//! let orchestrator = SearchOrchestrator::new(SearchConfig::default())
//!     .with_provider(Arc::new(DiscogsClient::new(token)));
//!
//! let query = MatchQuery {
//!     artist: "Produgy".into(),
//!     title: "Breathe".into(),
//!     ..MatchQuery::default()
//! };
//! let ranked = orchestrator.find_matches(&query).await;
//! ```

pub mod discogs;
pub mod domain;
pub mod orchestrator;
pub mod scorer;
pub mod strategy;
pub mod tracklist;
pub mod traits;

pub use discogs::DiscogsClient;
pub use domain::{
    Candidate, MatchQuery, ProviderError, ProviderId, RankedTrack, SearchMode, SearchStrategy,
    StrategyKind, TrackCandidate, TrackScoreBreakdown,
};
pub use orchestrator::{SearchConfig, SearchOrchestrator};
pub use scorer::score_candidate;
pub use strategy::generate_strategies;
pub use tracklist::{rank_tracks, select_track};
pub use traits::{
    Correction, CorrectionStore, GarbageDetector, MojibakeDetector, ProviderAdapter,
};
