// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The indexing pipeline.
//!
//! ```text
//! discover ──► read + parse ──► drop drafts ──► flatten ──► index ──► write
//! (sorted)     (fatal on error)                (doc, meta)           (both or none)
//! ```
//!
//! Documents are processed one at a time in discovery order; the first
//! unreadable or unparseable file aborts the run before anything is written.

pub mod reader;
pub mod writer;

use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::IndexerConfig;
use crate::content::{discover, ContentDocument};
use crate::error::Result;
use crate::flatten::Flattener;
use crate::index::build_search_index;
use crate::types::{MetaEntry, SearchDocument};

pub use reader::{read_artifacts, LoadedArtifacts};
pub use writer::{write_artifacts, ArtifactStats, WriteReport};

/// Flattened documents ready for indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub documents: Vec<SearchDocument>,
    pub meta: Vec<MetaEntry>,
    /// Files skipped because their front-matter marks them as drafts
    pub drafts: usize,
}

impl Corpus {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub documents: usize,
    pub drafts: usize,
    pub keys: usize,
    pub terms: usize,
    pub artifacts: WriteReport,
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Discover, parse and flatten every non-draft document under the build root.
pub fn collect_corpus(config: &IndexerConfig) -> Result<Corpus> {
    let paths = discover(&config.root, &config.pattern)?;
    info!(count = paths.len(), pattern = %config.pattern, "discovered content files");

    #[cfg(feature = "parallel")]
    let progress = {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(create_progress_style());
        pb.set_prefix("Flattening");
        pb
    };

    let flattener = Flattener::new(config);
    let mut corpus = Corpus::default();

    for path in &paths {
        let doc = ContentDocument::read(path)?;

        if doc.is_draft() {
            debug!(path = %path.display(), "skipping draft");
            corpus.drafts += 1;
        } else {
            let (search, meta) = flattener.flatten(&doc);
            debug!(
                id = search.id(),
                keys = search.len(),
                components = search.component_count(),
                "flattened document"
            );
            corpus.documents.push(search);
            corpus.meta.push(meta);
        }

        #[cfg(feature = "parallel")]
        progress.inc(1);
    }

    #[cfg(feature = "parallel")]
    progress.finish_and_clear();

    Ok(corpus)
}

/// Run the whole pipeline for `config`.
///
/// Returns `Ok(None)` without touching the output directory when no
/// publishable document was found.
pub fn run_build(config: &IndexerConfig) -> Result<Option<BuildReport>> {
    config.validate()?;

    let corpus = collect_corpus(config)?;
    if corpus.is_empty() {
        warn!(
            root = %config.root.display(),
            pattern = %config.pattern,
            drafts = corpus.drafts,
            "no documents found; skipping index generation"
        );
        return Ok(None);
    }

    let artifact = build_search_index(&corpus.documents, config);
    let artifacts = write_artifacts(
        &config.index_path(),
        &config.meta_path(),
        &artifact,
        &corpus.meta,
        config.gzip_level,
    )?;

    info!(
        documents = corpus.documents.len(),
        keys = artifact.keys.len(),
        index = %artifacts.index.path.display(),
        meta = %artifacts.meta.path.display(),
        "search index written"
    );

    Ok(Some(BuildReport {
        documents: corpus.documents.len(),
        drafts: corpus.drafts,
        keys: artifact.keys.len(),
        terms: artifact.index.terms.len(),
        artifacts,
    }))
}
