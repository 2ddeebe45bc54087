// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pipeline configuration.
//!
//! All tunables (weight split, length thresholds, caps, marker names, paths)
//! live in one immutable [`IndexerConfig`] that is handed to the pipeline entry
//! point. The pipeline is then a pure function of (documents, config).
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. Optional JSON config file (`--config`), every field optional
//! 3. CLI flags

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexerError, Result};

/// Floating-point slack when checking that weights sum to one.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct IndexerConfig {
    /// Build root; every other path is relative to it.
    pub root: PathBuf,
    /// Glob selecting content documents, relative to `root`.
    pub pattern: String,
    /// Directory that slugs are derived relative to.
    pub content_dir: PathBuf,
    /// Public directory receiving both artifacts.
    pub output_dir: PathBuf,
    pub index_file: String,
    pub meta_file: String,

    /// Fixed weight of the `title` key.
    pub title_weight: f64,
    /// Weight shared equally by every other key.
    pub content_weight: f64,

    /// Joined block text must be strictly longer than this to become a key.
    pub min_component_len: usize,
    /// Safety cap on `component_*` keys per document.
    pub max_components: usize,
    /// Cleaned body must be strictly longer than this to become `mdx_body`.
    pub min_body_len: usize,
    /// Fallback `paragraph_*` keys per document.
    pub max_paragraphs: usize,
    /// Unknown-key strings at least this long are treated as prose.
    pub prose_min_len: usize,

    /// Template name marking the blog header block.
    pub blog_header_template: String,
    /// Template name used when a block carries none.
    pub default_template: String,
    /// Tag color used when a tag carries none.
    pub default_tag_color: String,

    /// Gzip level, 0-9.
    pub gzip_level: u32,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pattern: "content/pages/blog/*/**/page.mdx".to_string(),
            content_dir: PathBuf::from("content/pages"),
            output_dir: PathBuf::from("public/search"),
            index_file: "search-index.json.gz".to_string(),
            meta_file: "search-meta.json.gz".to_string(),
            title_weight: 0.35,
            content_weight: 0.65,
            min_component_len: 20,
            max_components: 200,
            min_body_len: 40,
            max_paragraphs: 5,
            prose_min_len: 30,
            blog_header_template: "blog_header".to_string(),
            default_template: "block".to_string(),
            default_tag_color: "primary".to_string(),
            gzip_level: 6,
        }
    }
}

impl IndexerConfig {
    /// Load defaults overlaid with a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| IndexerError::io(path, e))?;
        let config: IndexerConfig = serde_json::from_str(&content).map_err(|e| {
            IndexerError::Config(format!("invalid config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("titleWeight", self.title_weight),
            ("contentWeight", self.content_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(IndexerError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, weight
                )));
            }
        }
        if (self.title_weight + self.content_weight - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(IndexerError::Config(format!(
                "titleWeight + contentWeight must equal 1, got {}",
                self.title_weight + self.content_weight
            )));
        }
        if self.max_components == 0 {
            return Err(IndexerError::Config(
                "maxComponents must be at least 1".to_string(),
            ));
        }
        if self.pattern.trim().is_empty() {
            return Err(IndexerError::Config("pattern must not be empty".to_string()));
        }
        if self.index_file.is_empty() || self.meta_file.is_empty() {
            return Err(IndexerError::Config(
                "artifact file names must not be empty".to_string(),
            ));
        }
        if self.index_file == self.meta_file {
            return Err(IndexerError::Config(
                "indexFile and metaFile must differ".to_string(),
            ));
        }
        if self.gzip_level > 9 {
            return Err(IndexerError::Config(format!(
                "gzipLevel must be within 0-9, got {}",
                self.gzip_level
            )));
        }
        Ok(())
    }

    /// Absolute-or-relative directory slugs are derived from.
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.content_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_path().join(&self.index_file)
    }

    pub fn meta_path(&self) -> PathBuf {
        self.output_path().join(&self.meta_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = IndexerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.title_weight, 0.35);
        assert_eq!(config.max_components, 200);
    }

    #[test]
    fn test_partial_json_overlays_defaults() {
        let json = r#"{"root": "site", "maxComponents": 10}"#;
        let config: IndexerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.root, PathBuf::from("site"));
        assert_eq!(config.max_components, 10);
        assert_eq!(config.min_body_len, 40);
        assert_eq!(config.index_path(), PathBuf::from("site/public/search/search-index.json.gz"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"maxComponentz": 10}"#;
        assert!(serde_json::from_str::<IndexerConfig>(json).is_err());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = IndexerConfig {
            title_weight: 0.5,
            ..IndexerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must equal 1"));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = IndexerConfig {
            max_components: 0,
            ..IndexerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_artifact_names_rejected() {
        let config = IndexerConfig {
            meta_file: "search-index.json.gz".to_string(),
            ..IndexerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blockdex.json");
        fs::write(&path, r#"{"gzipLevel": 9, "outputDir": "dist/search"}"#).unwrap();

        let config = IndexerConfig::load(&path).unwrap();
        assert_eq!(config.gzip_level, 9);
        assert_eq!(config.output_dir, PathBuf::from("dist/search"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = IndexerConfig::load(Path::new("/nonexistent/blockdex.json")).unwrap_err();
        assert!(matches!(err, IndexerError::Io { .. }));
    }
}
