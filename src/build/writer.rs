// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact writer: serialize, gzip, and publish both artifacts together.
//!
//! The search index and its metadata are consumed as a pair by the client,
//! so they are published as a pair:
//!
//! ```text
//! serialize ──► gzip (index ∥ meta) ──► write .tmp siblings (∥) ──► rename both
//!                                              │
//!                                              └─ failure: remove temporaries
//! ```
//!
//! The gzip header carries no timestamp or file name, so an unchanged corpus
//! produces byte-identical files.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{IndexerError, Result};
use crate::index::SearchIndexArtifact;
use crate::types::MetaEntry;

/// Size and checksum of one written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStats {
    pub path: PathBuf,
    /// Serialized JSON size
    pub raw_bytes: usize,
    /// Size on disk
    pub compressed_bytes: usize,
    /// CRC32 of the compressed bytes
    pub crc32: u32,
}

impl ArtifactStats {
    /// Percentage saved by compression.
    pub fn savings_pct(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bytes as f64 / self.raw_bytes as f64) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub index: ArtifactStats,
    pub meta: ArtifactStats,
}

/// Compact JSON of the index artifact.
pub fn serialize_index(artifact: &SearchIndexArtifact) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(artifact)?)
}

/// Pretty-printed JSON of the metadata list.
pub fn serialize_meta(meta: &[MetaEntry]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(meta)?)
}

/// Gzip `bytes` at `level` (0-9).
pub fn gzip(bytes: &[u8], level: u32) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 4), Compression::new(level));
    encoder.write_all(bytes)?;
    encoder.finish()
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}

/// Hidden sibling used while writing `path`.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| IndexerError::io(dir, e))
        }
        _ => Ok(()),
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!(path = %path.display(), error = %e, "failed to remove temporary file");
        }
    }
}

/// Serialize, compress and write both artifacts.
///
/// Either both target files are replaced or, on a write failure, neither is
/// and no temporaries are left behind.
pub fn write_artifacts(
    index_path: &Path,
    meta_path: &Path,
    artifact: &SearchIndexArtifact,
    meta: &[MetaEntry],
    level: u32,
) -> Result<WriteReport> {
    let index_json = serialize_index(artifact)?;
    let meta_json = serialize_meta(meta)?;

    let (index_gz, meta_gz) = join(|| gzip(&index_json, level), || gzip(&meta_json, level));
    let index_gz = index_gz.map_err(|e| IndexerError::io(index_path, e))?;
    let meta_gz = meta_gz.map_err(|e| IndexerError::io(meta_path, e))?;

    ensure_parent(index_path)?;
    ensure_parent(meta_path)?;

    let index_tmp = temp_path(index_path);
    let meta_tmp = temp_path(meta_path);

    let (index_written, meta_written) = join(
        || fs::write(&index_tmp, &index_gz).map_err(|e| IndexerError::io(&index_tmp, e)),
        || fs::write(&meta_tmp, &meta_gz).map_err(|e| IndexerError::io(&meta_tmp, e)),
    );
    if let Err(e) = index_written.and(meta_written) {
        remove_quietly(&index_tmp);
        remove_quietly(&meta_tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&index_tmp, index_path) {
        remove_quietly(&index_tmp);
        remove_quietly(&meta_tmp);
        return Err(IndexerError::io(index_path, e));
    }
    if let Err(e) = fs::rename(&meta_tmp, meta_path) {
        remove_quietly(&meta_tmp);
        return Err(IndexerError::io(meta_path, e));
    }

    debug!(
        index = %index_path.display(),
        meta = %meta_path.display(),
        "artifacts written"
    );

    Ok(WriteReport {
        index: ArtifactStats {
            path: index_path.to_path_buf(),
            raw_bytes: index_json.len(),
            compressed_bytes: index_gz.len(),
            crc32: crc32fast::hash(&index_gz),
        },
        meta: ArtifactStats {
            path: meta_path.to_path_buf(),
            raw_bytes: meta_json.len(),
            compressed_bytes: meta_gz.len(),
            crc32: crc32fast::hash(&meta_gz),
        },
    })
}
