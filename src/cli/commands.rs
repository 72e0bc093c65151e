//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns an `anyhow::Result<()>`. The handlers are thin
//! translators: they assemble engine inputs, run the engine, and print.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

mod search;
mod tracks;

/// Tunehound CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search metadata catalogs for a release matching a noisy artist/title
    Search {
        /// Audio file to read artist/title/duration from
        #[arg(conflicts_with_all = ["artist", "title"])]
        file: Option<PathBuf>,
        /// Artist to search for
        #[arg(short, long)]
        artist: Option<String>,
        /// Title to search for
        #[arg(short, long)]
        title: Option<String>,
        /// Confidence reported by an upstream identification (0.0-1.0)
        #[arg(long)]
        confidence: Option<f64>,
        /// Discogs personal access token (or set DISCOGS_TOKEN env var)
        #[arg(long, env = "DISCOGS_TOKEN")]
        token: Option<String>,
        /// Show at most this many results
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank the tracks of a release against a file's title and duration
    Tracks {
        /// Discogs release id whose tracklist to rank
        release_id: u64,
        /// Audio file to read title/duration from
        #[arg(conflicts_with_all = ["artist", "title"])]
        file: Option<PathBuf>,
        /// Artist, when the pair may be transposed
        #[arg(short, long)]
        artist: Option<String>,
        /// Title to match
        #[arg(short, long)]
        title: Option<String>,
        /// Known duration in seconds
        #[arg(short, long)]
        duration: Option<u32>,
        /// Discogs personal access token (or set DISCOGS_TOKEN env var)
        #[arg(long, env = "DISCOGS_TOKEN")]
        token: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Search {
            file,
            artist,
            title,
            confidence,
            token,
            limit,
            json,
        } => search::cmd_search(
            &rt,
            file.as_deref(),
            artist.as_deref(),
            title.as_deref(),
            *confidence,
            token.as_deref(),
            *limit,
            *json,
        ),
        Commands::Tracks {
            release_id,
            file,
            artist,
            title,
            duration,
            token,
            json,
        } => tracks::cmd_tracks(
            &rt,
            *release_id,
            file.as_deref(),
            artist.as_deref(),
            title.as_deref(),
            *duration,
            token.as_deref(),
            *json,
        ),
    }
}

/// Resolve the Discogs token from flag, then config, or exit with guidance.
fn require_token(flag: Option<&str>) -> String {
    if let Some(token) = flag {
        return token.to_string();
    }
    if let Some(token) = crate::config::load().credentials.discogs_token {
        return token;
    }
    eprintln!("Error: Discogs personal access token required.");
    eprintln!("Get one at: https://www.discogs.com/settings/developers");
    eprintln!("Then use: --token YOUR_TOKEN, set DISCOGS_TOKEN, or add it to the config file");
    std::process::exit(1);
}
