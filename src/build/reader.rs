// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading published artifacts back, for inspection and verification.

use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::WEIGHT_TOLERANCE;
use crate::error::{IndexerError, Result};
use crate::index::{total_weight, SearchIndexArtifact};
use crate::types::MetaEntry;

/// Both artifacts of a build, decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedArtifacts {
    pub index: SearchIndexArtifact,
    pub meta: Vec<MetaEntry>,
    pub index_path: PathBuf,
    pub meta_path: PathBuf,
    /// (compressed, decompressed) byte counts
    pub index_size: (usize, usize),
    pub meta_size: (usize, usize),
}

impl LoadedArtifacts {
    /// Weights sum to one and title leads.
    pub fn weights_valid(&self) -> bool {
        let keys = &self.index.keys;
        let title_first = keys.first().is_some_and(|k| k.name == "title");
        let sum = total_weight(keys);
        // a title-only corpus carries just the title share
        let expected = if keys.len() == 1 { keys[0].weight } else { 1.0 };
        title_first && (sum - expected).abs() <= WEIGHT_TOLERANCE
    }

    /// The index and the metadata list describe the same documents.
    pub fn counts_match(&self) -> bool {
        self.index.index.len() == self.meta.len()
    }
}

fn artifact_error(path: &Path, message: impl Into<String>) -> IndexerError {
    IndexerError::Artifact {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Read and gunzip one artifact. Returns (compressed size, JSON text).
fn read_gzip_json(path: &Path) -> Result<(usize, String)> {
    if !path.is_file() {
        return Err(artifact_error(path, "artifact not found"));
    }
    let compressed = fs::read(path).map_err(|e| IndexerError::io(path, e))?;
    let mut json = String::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_string(&mut json)
        .map_err(|e| artifact_error(path, format!("not a gzip JSON file: {}", e)))?;
    Ok((compressed.len(), json))
}

pub fn read_artifacts(index_path: &Path, meta_path: &Path) -> Result<LoadedArtifacts> {
    let (index_gz, index_json) = read_gzip_json(index_path)?;
    let index: SearchIndexArtifact = serde_json::from_str(&index_json)
        .map_err(|e| artifact_error(index_path, format!("malformed index: {}", e)))?;

    let (meta_gz, meta_json) = read_gzip_json(meta_path)?;
    let meta: Vec<MetaEntry> = serde_json::from_str(&meta_json)
        .map_err(|e| artifact_error(meta_path, format!("malformed metadata: {}", e)))?;

    Ok(LoadedArtifacts {
        index,
        meta,
        index_path: index_path.to_path_buf(),
        meta_path: meta_path.to_path_buf(),
        index_size: (index_gz, index_json.len()),
        meta_size: (meta_gz, meta_json.len()),
    })
}
