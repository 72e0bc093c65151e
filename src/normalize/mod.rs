//! Text normalization for noisy music metadata.
//!
//! Everything in this module is a pure function over strings: no I/O, no
//! engine state, safe to call concurrently. The rest of the crate builds on
//! these primitives:
//! - [`similarity`] - string comparison, canonical forms, parenthesis splitting
//! - [`variants`] - typo/fuzzy variant generation and artist-name tiers
//! - [`filename`] - "is this tag actually a filename?" heuristics and
//!   mojibake detection

pub mod filename;
pub mod similarity;
pub mod variants;

pub use filename::{contains_mojibake, is_valid_tag, looks_like_filename, split_artist_title};
pub use similarity::{
    ParenthesisInfo, extract_parenthesis_info, normalize_artist, normalize_title,
    significant_words, string_similarity,
};
pub use variants::{artist_name_tiers, fuzzy_variants};
