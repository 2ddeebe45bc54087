// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the indexing pipeline.
//!
//! Every failure is fatal to the run: the pipeline either writes both
//! artifacts or nothing. Malformed block subtrees and invalid blog dates are
//! not errors at all; they just contribute nothing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering, parsing, indexing or writing.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Filesystem read/write failed for a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed during discovery
    #[error("Discovery error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The content glob pattern does not compile
    #[error("Invalid content pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Front-matter block is unterminated or not a mapping
    #[error("Invalid front-matter in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },

    /// Front-matter YAML does not parse
    #[error("YAML error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration values are out of range or the config file is unreadable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A written artifact is missing or malformed
    #[error("Artifact error in {}: {message}", path.display())]
    Artifact { path: PathBuf, message: String },
}

impl From<serde_json::Error> for IndexerError {
    fn from(err: serde_json::Error) -> Self {
        IndexerError::Serialization(err.to_string())
    }
}

impl IndexerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexerError>;
