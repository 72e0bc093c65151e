//! Strategy generation: one noisy (artist, title) pair fans out into an
//! ordered, deduplicated set of search attempts.
//!
//! Generation proceeds in fixed tiers, most-trusted first: direct queries,
//! then typo-fix variants, then parenthesis-stripped titles, then
//! progressively looser artist/title variant combinations, ending with the
//! swapped-orientation rescue. Priorities come from a single ordered build
//! pass (`priority = index`); the dedup pass keeps the first (lowest
//! priority) occurrence of each `(kind, artist, title, mode, source)` key.

use std::collections::HashSet;

use super::domain::{ProviderId, SearchMode, SearchStrategy, StrategyKind};
use crate::normalize::{artist_name_tiers, extract_parenthesis_info, fuzzy_variants};

/// How many fuzzy artist corrections feed the typo-fix tier.
const TYPO_VARIANT_LIMIT: usize = 4;
/// How many normalized artist renderings feed the track-search tier.
const ARTIST_TIER_LIMIT: usize = 3;
/// Variant combination width for the master/release fallback grids.
const COMBO_LIMIT: usize = 2;

/// A strategy before provider expansion and priority assignment.
struct Attempt {
    kind: StrategyKind,
    artist: String,
    title: String,
    mode: SearchMode,
    description: &'static str,
}

impl Attempt {
    fn new(
        kind: StrategyKind,
        artist: impl Into<String>,
        title: impl Into<String>,
        mode: SearchMode,
        description: &'static str,
    ) -> Self {
        Self {
            kind,
            artist: artist.into(),
            title: title.into(),
            mode,
            description,
        }
    }

    /// Free-text query attempt; the literal query lives in the title field so
    /// differently separated forms stay distinct under the dedup key.
    fn query(text: String, description: &'static str) -> Self {
        Self::new(StrategyKind::Query, "", text, SearchMode::All, description)
    }
}

/// Build the ordered, deduplicated strategy list for one search call.
///
/// Either input may be empty; both empty yields no strategies. Strategies are
/// generated per configured source, tier-ordered and source-interleaved, so
/// tier order dominates priority regardless of how many sources exist.
pub fn generate_strategies(
    artist: &str,
    title: &str,
    sources: &[ProviderId],
) -> Vec<SearchStrategy> {
    let artist = artist.trim();
    let title = title.trim();
    if (artist.is_empty() && title.is_empty()) || sources.is_empty() {
        return Vec::new();
    }

    let base = extract_parenthesis_info(title).base;
    let artist_tiers = artist_name_tiers(artist);
    let title_variants = unique_nonempty([title.to_string(), base.clone()]);

    let mut attempts: Vec<Attempt> = Vec::new();

    // Tier 1: direct searches with the inputs exactly as given.
    if !artist.is_empty() && !title.is_empty() {
        attempts.push(Attempt::query(
            format!("{artist} - {title}"),
            "direct artist - title query",
        ));
        attempts.push(Attempt::query(
            format!("{artist} {title}"),
            "direct artist title query",
        ));
        attempts.push(Attempt::new(
            StrategyKind::Exact,
            artist,
            title,
            SearchMode::All,
            "exact track search",
        ));
        attempts.push(Attempt::new(
            StrategyKind::Exact,
            artist,
            title,
            SearchMode::Master,
            "exact master search",
        ));
    }

    // Tier 2: typo-fix tier, droppable as a block via `is_typo_fix`.
    if !artist.is_empty() && !title.is_empty() {
        for variant in fuzzy_variants(artist).iter().take(TYPO_VARIANT_LIMIT) {
            attempts.push(Attempt::new(
                StrategyKind::Fuzzy,
                "",
                format!("{variant} - {title}"),
                SearchMode::All,
                "typo-corrected artist query",
            ));
            attempts.push(Attempt::new(
                StrategyKind::Fuzzy,
                variant.clone(),
                title,
                SearchMode::All,
                "typo-corrected track search",
            ));
            attempts.push(Attempt::new(
                StrategyKind::Fuzzy,
                variant.clone(),
                "",
                SearchMode::All,
                "typo-corrected artist releases",
            ));
        }
    }

    // Tier 3: parenthesis-stripped title, when the stripping bought anything.
    if !artist.is_empty() && base != title && base.chars().count() > 2 {
        attempts.push(Attempt::query(
            format!("{artist} - {base}"),
            "base title query",
        ));
        attempts.push(Attempt::query(
            format!("{artist} {base}"),
            "base title unseparated query",
        ));
        attempts.push(Attempt::new(
            StrategyKind::Exact,
            artist,
            base.clone(),
            SearchMode::All,
            "base title track search",
        ));
        attempts.push(Attempt::new(
            StrategyKind::Exact,
            artist,
            base.clone(),
            SearchMode::Master,
            "base title master search",
        ));
    }

    // Tier 4: normalized artist renderings (skipping the original) x base.
    if !base.is_empty() {
        for variant in artist_tiers.iter().skip(1).take(ARTIST_TIER_LIMIT) {
            attempts.push(Attempt::new(
                StrategyKind::Track,
                variant.clone(),
                base.clone(),
                SearchMode::All,
                "normalized artist track search",
            ));
        }
    }

    // Tier 5: variant grid against the master universe.
    for artist_variant in artist_tiers.iter().take(COMBO_LIMIT) {
        for title_variant in title_variants.iter().take(COMBO_LIMIT) {
            attempts.push(Attempt::new(
                StrategyKind::Release,
                artist_variant.clone(),
                title_variant.clone(),
                SearchMode::Master,
                "variant master search",
            ));
        }
    }

    // Tier 6: single-field searches.
    if !title.is_empty() {
        attempts.push(Attempt::new(
            StrategyKind::Track,
            "",
            title,
            SearchMode::All,
            "title-only track search",
        ));
        attempts.push(Attempt::query(title.to_string(), "title-only query"));
    }
    for variant in artist_tiers.iter().take(COMBO_LIMIT) {
        attempts.push(Attempt::new(
            StrategyKind::Release,
            variant.clone(),
            "",
            SearchMode::Master,
            "artist-only master search",
        ));
    }

    // Tier 7: the same variant grid against plain releases, broadest net.
    for artist_variant in artist_tiers.iter().take(COMBO_LIMIT) {
        for title_variant in title_variants.iter().take(COMBO_LIMIT) {
            attempts.push(Attempt::new(
                StrategyKind::Release,
                artist_variant.clone(),
                title_variant.clone(),
                SearchMode::Release,
                "variant release search",
            ));
        }
    }

    // Tier 8: swapped orientation, recovering "Release - Track" misparses.
    if !artist.is_empty() && !title.is_empty() && artist != title {
        attempts.push(Attempt::new(
            StrategyKind::Swap,
            base.clone(),
            artist,
            SearchMode::All,
            "swapped artist/title track search",
        ));
    }

    expand_and_dedup(attempts, sources)
}

/// Expand attempts across sources with `priority = index`, then keep the
/// first occurrence of each dedup key.
fn expand_and_dedup(attempts: Vec<Attempt>, sources: &[ProviderId]) -> Vec<SearchStrategy> {
    let mut strategies = Vec::with_capacity(attempts.len() * sources.len());
    for attempt in attempts {
        for &source in sources {
            strategies.push(SearchStrategy {
                kind: attempt.kind,
                artist: attempt.artist.clone(),
                title: attempt.title.clone(),
                mode: attempt.mode,
                description: attempt.description,
                priority: strategies.len(),
                source,
            });
        }
    }

    strategies.sort_by_key(|s| s.priority);
    let mut seen = HashSet::new();
    strategies.retain(|s| seen.insert(s.dedup_key()));
    strategies
}

fn unique_nonempty<const N: usize>(values: [String; N]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(N);
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
