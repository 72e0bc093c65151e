//! Tracklist ranking command.

use std::path::Path;

use tokio::runtime::Runtime;

use crate::matching::{DiscogsClient, rank_tracks, select_track};
use crate::tags;

use super::require_token;

/// Fetch a release's tracklist and rank it against the file's title.
#[allow(clippy::too_many_arguments)]
pub fn cmd_tracks(
    rt: &Runtime,
    release_id: u64,
    file: Option<&Path>,
    artist: Option<&str>,
    title: Option<&str>,
    duration: Option<u32>,
    token: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let token = require_token(token);

        let (artist, title, duration) = match file {
            Some(path) => {
                let input = tags::from_path(path)?;
                (input.artist, input.title, input.duration_secs)
            }
            None => (
                artist.unwrap_or_default().to_string(),
                title.unwrap_or_default().to_string(),
                duration,
            ),
        };
        if title.trim().is_empty() {
            anyhow::bail!("nothing to match: provide a file or --title");
        }

        let client = DiscogsClient::new(token);
        let tracklist = client.release_tracks(release_id).await?;
        let ranked = rank_tracks(&artist, &title, duration, &tracklist);
        let selected = select_track(&artist, &title, duration, &tracklist);

        if json {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
            return Ok(());
        }

        if ranked.is_empty() {
            println!("Release {release_id} has no real tracks.");
            return Ok(());
        }

        println!();
        println!("Tracks of release {release_id}, best match first:");
        for entry in &ranked {
            let duration = entry
                .track
                .duration_secs
                .map(|d| format!("{}:{:02}", d / 60, d % 60))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  [{:>3}] {:<4} {} ({}) title={} version={} duration={}",
                entry.score,
                entry.track.position,
                entry.track.title,
                duration,
                entry.breakdown.title_score,
                entry.breakdown.version_score,
                entry.breakdown.duration_score,
            );
        }

        println!();
        match selected {
            Some(winner) => println!(
                "✓ Selected: {} {} (score {})",
                winner.track.position, winner.track.title, winner.score
            ),
            None => println!("✗ No confident match (best score below threshold)"),
        }
        Ok(())
    })
}
