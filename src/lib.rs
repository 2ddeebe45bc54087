//! Build-time search index generator for block-composed content.
//!
//! Pages authored in a block-based CMS are stored as Markdown/MDX files whose
//! YAML front-matter holds an arbitrary list of blocks. This crate turns a
//! directory of such pages into two gzip-compressed JSON artifacts consumed
//! by a client-side search UI: a keyed full-text index with per-key weights,
//! and a list of display metadata.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌─────────────┐   ┌─────────────┐   ┌────────────┐   ┌─────────────┐
//! │  content   │──▶│   flatten   │──▶│    index    │──▶│   build    │──▶│  *.json.gz  │
//! │ (discover, │   │ (classify,  │   │ (weights,   │   │ (pipeline, │   │ index, meta │
//! │  parse)    │   │  blog, meta)│   │  KeyedIndex)│   │  writer)   │   │             │
//! └────────────┘   └─────────────┘   └─────────────┘   └────────────┘   └─────────────┘
//! ```
//!
//! | Module     | Role                                                    |
//! |------------|---------------------------------------------------------|
//! | `content`  | Glob discovery, front-matter split, slugs               |
//! | `classify` | Is this string human text or layout noise?              |
//! | `flatten`  | Blocks → `component_*` keys, blog header, display meta  |
//! | `index`    | Key weights and the keyed inverted index                |
//! | `build`    | Pipeline entry point, artifact writer and reader        |
//! | `config`   | One immutable `IndexerConfig` for every tunable         |
//!
//! # Usage
//!
//! ```ignore
//! use blockdex::{run_build, IndexerConfig};
//!
//! let config = IndexerConfig { root: "site".into(), ..IndexerConfig::default() };
//! if let Some(report) = run_build(&config)? {
//!     println!("{} documents indexed", report.documents);
//! }
//! ```

pub mod build;
pub mod classify;
pub mod config;
pub mod content;
pub mod error;
pub mod flatten;
pub mod index;
pub mod testing;
pub mod types;
pub mod utils;

pub use build::{collect_corpus, run_build, BuildReport, Corpus};
pub use config::IndexerConfig;
pub use content::{discover, path_to_slug, ContentDocument};
pub use error::{IndexerError, Result};
pub use flatten::{component_key, extract_text_entries, paragraph_key, Flattener};
pub use index::{build_search_index, compute_key_weights, KeyedIndex, SearchIndexArtifact};
pub use types::{BlogTag, KeyWeight, MetaEntry, SearchDocument, TextEntry};
pub use utils::normalize;
