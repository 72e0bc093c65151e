//! Search orchestration: rate-limited batch execution with early stopping.
//!
//! The orchestrator is the only component in the engine with sequencing
//! state (the accumulating candidate set), and it mutates that state at a
//! single join point after each batch completes - never while provider calls
//! are in flight. Batches run sequentially; within a batch every provider
//! call runs concurrently. The batch size is a backpressure limit tied to
//! the providers' published rate budgets, not a tuning knob.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future;
use tracing::{debug, info, warn};

use super::domain::{Candidate, MatchQuery, ProviderError, ProviderId, SearchStrategy};
use super::scorer::score_candidate;
use super::strategy::generate_strategies;
use super::traits::{CorrectionStore, GarbageDetector, ProviderAdapter};
use crate::normalize;

/// Early-stop thresholds, checked in order after every batch.
const STOP_SCORE_CERTAIN: i32 = 90;
const STOP_SCORE_STRONG: i32 = 70;
const STOP_SCORE_PLAUSIBLE: i32 = 50;
const STOP_PLAUSIBLE_MIN_COUNT: usize = 3;

/// Engine settings. The defaults are the values the scoring thresholds were
/// tuned against; the delay is injectable so tests don't sleep for real.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Hard cap on strategies per run.
    pub max_strategies: usize,
    /// Concurrent provider calls per batch (rate-budget backpressure).
    pub batch_size: usize,
    /// Fixed delay between batches, modeling a ~60 requests/minute budget.
    pub batch_delay: Duration,
    /// External confidence at which the typo-fix tier is dropped.
    pub skip_typo_confidence: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_strategies: 15,
            batch_size: 4,
            batch_delay: Duration::from_millis(1000),
            skip_typo_confidence: 0.8,
        }
    }
}

/// Runs strategies against the configured providers and accumulates a ranked
/// candidate list.
pub struct SearchOrchestrator {
    config: SearchConfig,
    providers: Vec<Arc<dyn ProviderAdapter>>,
    garbage: Option<Box<dyn GarbageDetector>>,
    corrections: Option<Box<dyn CorrectionStore>>,
}

impl SearchOrchestrator {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            providers: Vec::new(),
            garbage: None,
            corrections: None,
        }
    }

    /// Register a metadata source.
    pub fn with_provider(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Attach an optional garbage-text detector, consulted before strategy
    /// generation.
    pub fn with_garbage_detector(mut self, detector: Box<dyn GarbageDetector>) -> Self {
        self.garbage = Some(detector);
        self
    }

    /// Attach an optional known-good correction store, consulted before
    /// strategy generation.
    pub fn with_correction_store(mut self, store: Box<dyn CorrectionStore>) -> Self {
        self.corrections = Some(store);
        self
    }

    /// Find and rank candidate releases for one noisy query.
    ///
    /// Returns the full ranked list, never truncated. Provider failures
    /// degrade to empty per-strategy results; the call itself cannot fail.
    pub async fn find_matches(&self, query: &MatchQuery) -> Vec<Candidate> {
        let (artist, title) = self.prepare_input(query);

        if artist.is_empty() && title.is_empty() {
            debug!("empty artist and title after prechecks, skipping search");
            return Vec::new();
        }

        let sources: Vec<ProviderId> = self.providers.iter().map(|p| p.id()).collect();
        let mut strategies = generate_strategies(&artist, &title, &sources);

        if query.external_confidence.unwrap_or(0.0) >= self.config.skip_typo_confidence {
            let before = strategies.len();
            strategies.retain(|s| !s.is_typo_fix());
            debug!(
                dropped = before - strategies.len(),
                "high external confidence, dropped typo-fix tier"
            );
        }
        strategies.truncate(self.config.max_strategies);

        let total_batches = strategies.len().div_ceil(self.config.batch_size.max(1));
        debug!(
            strategies = strategies.len(),
            batches = total_batches,
            artist = %artist,
            title = %title,
            "starting search run"
        );

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut seen: HashSet<(ProviderId, String)> = HashSet::new();

        for (batch_index, batch) in strategies.chunks(self.config.batch_size.max(1)).enumerate() {
            let results = future::join_all(batch.iter().map(|s| self.run_strategy(s))).await;

            // Single join point: aggregation and scoring only happen here,
            // after every call in the batch has finished.
            for (strategy, result) in batch.iter().zip(results) {
                match result {
                    Ok(found) => {
                        for mut candidate in found {
                            if seen.insert((candidate.source, candidate.id.clone())) {
                                candidate.score = score_candidate(&candidate, &artist, &title);
                                candidates.push(candidate);
                            }
                        }
                    }
                    Err(error) => {
                        warn!(
                            strategy = strategy.description,
                            priority = strategy.priority,
                            source = %strategy.source,
                            %error,
                            "search strategy failed"
                        );
                    }
                }
            }
            candidates.sort_by(|a, b| b.score.cmp(&a.score));

            let top = candidates.first().map_or(0, |c| c.score);
            if top >= STOP_SCORE_CERTAIN {
                debug!(top, batch = batch_index + 1, "early stop: certain match");
                break;
            }
            if top >= STOP_SCORE_STRONG {
                debug!(top, batch = batch_index + 1, "early stop: strong match");
                break;
            }
            if candidates.len() >= STOP_PLAUSIBLE_MIN_COUNT && top >= STOP_SCORE_PLAUSIBLE {
                debug!(
                    top,
                    count = candidates.len(),
                    batch = batch_index + 1,
                    "early stop: plausible matches accumulated"
                );
                break;
            }

            if batch_index + 1 < total_batches {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        info!(
            results = candidates.len(),
            top = candidates.first().map_or(0, |c| c.score),
            "search run complete"
        );
        candidates
    }

    /// Apply prechecks and hints to the raw query input.
    fn prepare_input(&self, query: &MatchQuery) -> (String, String) {
        let mut artist = query.artist.trim().to_string();
        let mut title = query.title.trim().to_string();

        if let Some(store) = &self.corrections
            && let Some(correction) = store.correction(&artist, &title)
        {
            info!(
                artist = %correction.artist,
                title = %correction.title,
                "applying known-good correction"
            );
            artist = correction.artist;
            title = correction.title;
        }

        if let Some(detector) = &self.garbage {
            if detector.is_garbage(&artist) {
                warn!(value = %artist, "artist tag contains garbage text, ignoring it");
                artist.clear();
            }
            if detector.is_garbage(&title) {
                warn!(value = %title, "title tag contains garbage text, ignoring it");
                title.clear();
            }
        }

        // Tags that are really filenames carry more noise than signal; the
        // filename hint parses cleaner.
        if !normalize::is_valid_tag(&title)
            && let Some(hint) = &query.filename_hint
            && let Some((hint_artist, hint_title)) = normalize::split_artist_title(hint)
        {
            debug!(hint = %hint, "deriving artist/title from filename hint");
            if artist.is_empty() {
                artist = hint_artist;
            }
            title = hint_title;
        }

        (artist, title)
    }

    async fn run_strategy(
        &self,
        strategy: &SearchStrategy,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let Some(provider) = self.providers.iter().find(|p| p.id() == strategy.source) else {
            return Err(ProviderError::Api(format!(
                "no provider configured for {}",
                strategy.source
            )));
        };
        debug!(
            strategy = strategy.description,
            priority = strategy.priority,
            source = %strategy.source,
            "running strategy"
        );
        provider.search(strategy).await
    }
}
