//! Catalog search command.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::config;
use crate::matching::{
    DiscogsClient, MatchQuery, MojibakeDetector, SearchOrchestrator,
};
use crate::tags;

use super::require_token;

/// Search the configured catalogs for a release matching the input.
#[allow(clippy::too_many_arguments)]
pub fn cmd_search(
    rt: &Runtime,
    file: Option<&Path>,
    artist: Option<&str>,
    title: Option<&str>,
    confidence: Option<f64>,
    token: Option<&str>,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let token = require_token(token);
        let settings = config::load().search;

        let mut query = match file {
            Some(path) => {
                let input = tags::from_path(path)?;
                println!(
                    "Read tags: artist={:?} title={:?} duration={:?}",
                    input.artist, input.title, input.duration_secs
                );
                input.into_query()
            }
            None => MatchQuery {
                artist: artist.unwrap_or_default().to_string(),
                title: title.unwrap_or_default().to_string(),
                ..MatchQuery::default()
            },
        };
        query.external_confidence = confidence;

        if query.artist.trim().is_empty() && query.title.trim().is_empty() {
            anyhow::bail!("nothing to search for: provide a file or --artist/--title");
        }

        let orchestrator = SearchOrchestrator::new(settings.to_search_config())
            .with_provider(Arc::new(DiscogsClient::new(token)))
            .with_garbage_detector(Box::new(MojibakeDetector));

        let results = orchestrator.find_matches(&query).await;

        if json {
            let shown: Vec<_> = results.iter().take(limit).collect();
            println!("{}", serde_json::to_string_pretty(&shown)?);
            return Ok(());
        }

        if results.is_empty() {
            println!("No matches found.");
            return Ok(());
        }

        println!();
        println!("{} match(es), best first:", results.len());
        for candidate in results.iter().take(limit) {
            let year = candidate
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "----".to_string());
            println!(
                "  [{:>4}] {:<8} {} - {} ({}, {})",
                candidate.score,
                format!("#{}", candidate.id),
                if candidate.artist.is_empty() {
                    "?"
                } else {
                    candidate.artist.as_str()
                },
                candidate.title,
                year,
                candidate.source,
            );
            if !candidate.styles.is_empty() {
                println!("          {}", candidate.styles.join(", "));
            }
        }
        if results.len() > limit {
            println!("  ... and {} more", results.len() - limit);
        }
        Ok(())
    })
}
