//! Command-line interface for tunehound.
//!
//! This module provides CLI commands for searching metadata catalogs and
//! matching tracks inside a release, without embedding the library.

mod commands;

pub use commands::{Cli, Commands, run_command};
