//! Trait seams for the search engine's collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real provider clients, while tests substitute
//! scripted implementations.

use async_trait::async_trait;

use super::domain::{Candidate, ProviderError, ProviderId, SearchStrategy};
use crate::normalize;

/// One metadata source, reduced to the single capability the engine needs.
///
/// Implementations own their transport concerns: every call must be bounded
/// by a timeout, and a timeout is reported like any other failure. Failures
/// are non-fatal to the caller.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which catalog this adapter talks to.
    fn id(&self) -> ProviderId;

    /// Execute one strategy and return the candidate records it found.
    async fn search(&self, strategy: &SearchStrategy) -> Result<Vec<Candidate>, ProviderError>;
}

/// Optional pre-search collaborator: flags corrupted text so the orchestrator
/// can blank it before generating strategies.
pub trait GarbageDetector: Send + Sync {
    fn is_garbage(&self, text: &str) -> bool;
}

/// Default detector backed by the fixed mojibake character class.
pub struct MojibakeDetector;

impl GarbageDetector for MojibakeDetector {
    fn is_garbage(&self, text: &str) -> bool {
        normalize::contains_mojibake(text)
    }
}

/// A previously confirmed correction for a noisy (artist, title) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub artist: String,
    pub title: String,
}

/// Optional pre-search collaborator: looks up known-good corrections before
/// any strategy is generated.
pub trait CorrectionStore: Send + Sync {
    fn correction(&self, artist: &str, title: &str) -> Option<Correction>;
}

#[async_trait]
impl ProviderAdapter for super::discogs::DiscogsClient {
    fn id(&self) -> ProviderId {
        ProviderId::Discogs
    }

    async fn search(&self, strategy: &SearchStrategy) -> Result<Vec<Candidate>, ProviderError> {
        self.search_strategy(strategy).await
    }
}
