//! Discogs database search, the crate's built-in metadata source.
//!
//! Thin translator only: `client` speaks HTTP, `dto` mirrors the wire
//! shapes, `adapter` converts them into domain types. All matching
//! intelligence lives upstream in the engine.

pub mod adapter;
pub mod client;
pub mod dto;

pub use client::DiscogsClient;
