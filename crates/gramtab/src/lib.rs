//! Command-line front end for `gramtab-core`.
//!
//! Parses arguments, loads the optional TOML config, and writes each
//! requested table fragment. See [`cli::Cli`] for the flags.

pub mod cli;
pub mod config;
mod run;

pub use run::{Artifact, render_artifacts, resolve_options, run};
