// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the blockdex command-line interface.
//!
//! Two subcommands: `index` runs the pipeline and publishes the artifacts,
//! `inspect` reads published artifacts back and checks them.

pub mod display;
pub mod inspect;
pub mod summary;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use blockdex::config::IndexerConfig;
use blockdex::error::Result;

#[derive(Parser)]
#[command(
    name = "blockdex",
    about = "Build-time search index generator for block-composed content",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search index and metadata artifacts
    Index {
        /// Build root; content and output paths are relative to it
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Glob selecting content files, relative to the root
        #[arg(short, long)]
        pattern: Option<String>,

        /// Directory URL slugs are derived from, relative to the root
        #[arg(long)]
        content_dir: Option<PathBuf>,

        /// Output directory for the .json.gz artifacts, relative to the root
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
        #[arg(long, default_value = "info")]
        log_level: String,
    },

    /// Decode published artifacts and check their consistency
    Inspect {
        /// Directory containing the index and metadata artifacts
        dir: PathBuf,

        /// JSON config file the artifacts were built with; supplies file names
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Index file name inside DIR (default search-index.json.gz)
        #[arg(long)]
        index_file: Option<String>,

        /// Metadata file name inside DIR (default search-meta.json.gz)
        #[arg(long)]
        meta_file: Option<String>,

        /// Log level when RUST_LOG is unset
        #[arg(long, default_value = "warn")]
        log_level: String,
    },
}

impl Commands {
    pub fn log_level(&self) -> &str {
        match self {
            Commands::Index { log_level, .. } | Commands::Inspect { log_level, .. } => log_level,
        }
    }
}

/// Defaults, then the config file, then flags.
pub fn resolve_config(
    config: Option<&PathBuf>,
    root: Option<PathBuf>,
    pattern: Option<String>,
    content_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<IndexerConfig> {
    let mut resolved = match config {
        Some(path) => IndexerConfig::load(path)?,
        None => IndexerConfig::default(),
    };
    if let Some(root) = root {
        resolved.root = root;
    }
    if let Some(pattern) = pattern {
        resolved.pattern = pattern;
    }
    if let Some(content_dir) = content_dir {
        resolved.content_dir = content_dir;
    }
    if let Some(output) = output {
        resolved.output_dir = output;
    }
    resolved.validate()?;
    Ok(resolved)
}

/// Artifact file names for `inspect`: defaults, then the config file, then flags.
pub fn resolve_artifact_names(
    config: Option<&PathBuf>,
    index_file: Option<String>,
    meta_file: Option<String>,
) -> Result<(String, String)> {
    let resolved = match config {
        Some(path) => IndexerConfig::load(path)?,
        None => IndexerConfig::default(),
    };
    Ok((
        index_file.unwrap_or(resolved.index_file),
        meta_file.unwrap_or(resolved.meta_file),
    ))
}
