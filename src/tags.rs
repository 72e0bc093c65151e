//! Audio file tag reading - the producer of the engine's noisy input.
//!
//! Uses the lofty crate for format-independent metadata access. Embedded
//! tags are preferred, but when they are missing or are really filenames in
//! disguise, the filename stem is parsed instead. Either way the output is
//! exactly the (artist, title, filename, duration) tuple the engine consumes.

use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

use crate::error::{Error, Result};
use crate::matching::MatchQuery;
use crate::normalize;

/// The noisy metadata read from one audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInput {
    pub artist: String,
    pub title: String,
    /// Filename stem, kept as a hint for the engine's prechecks.
    pub filename: String,
    pub duration_secs: Option<u32>,
}

/// Read tags and duration from an audio file.
///
/// Missing fields come back empty rather than erroring; unreadable files
/// (wrong format, truncated) fail with [`Error::Tags`].
pub fn read(path: &Path) -> Result<TagInput> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    let tagged_file = Probe::open(path)
        .map_err(|e| Error::tags(path, format!("failed to open file: {e}")))?
        .read()
        .map_err(|e| Error::tags(path, format!("failed to read metadata: {e}")))?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let title = tag
        .and_then(|t| t.title().map(|s| s.to_string()))
        .unwrap_or_default();
    let artist = tag
        .and_then(|t| t.artist().map(|s| s.to_string()))
        .unwrap_or_default();

    let duration = tagged_file.properties().duration().as_secs();
    let duration_secs = (duration > 0).then_some(duration as u32);

    Ok(TagInput {
        artist,
        title,
        filename: stem(path),
        duration_secs,
    })
}

/// Read a file and fall back to its filename when the embedded tags are
/// unusable.
pub fn from_path(path: &Path) -> Result<TagInput> {
    let mut input = read(path)?;

    if !normalize::is_valid_tag(&input.title) {
        if let Some((artist, title)) = normalize::split_artist_title(&input.filename) {
            if input.artist.trim().is_empty() {
                input.artist = artist;
            }
            input.title = title;
        } else if input.title.trim().is_empty() {
            input.title = input.filename.clone();
        }
    }

    Ok(input)
}

impl TagInput {
    /// Turn this input into an engine query.
    pub fn into_query(self) -> MatchQuery {
        MatchQuery {
            artist: self.artist,
            title: self.title,
            filename_hint: Some(self.filename),
            duration_secs: self.duration_secs,
            external_confidence: None,
        }
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
