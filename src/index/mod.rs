// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search index construction.
//!
//! Key weights are the ranking contract with the client: `title` always
//! carries a fixed share and every other key seen in the corpus splits the
//! rest equally. Keys are ordered title first, then first-seen order across
//! documents, which keeps the artifact stable for a stable corpus.

pub mod keyed;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::IndexerConfig;
use crate::types::{KeyWeight, SearchDocument, KEY_TITLE, UNWEIGHTED_KEYS};

pub use keyed::{FieldValue, IndexRecord, KeyedIndex, Posting, TermEntry};

/// Serialized form of the search index artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndexArtifact {
    pub keys: Vec<KeyWeight>,
    pub index: KeyedIndex,
}

/// Every weighted key other than `title`, in first-seen order.
pub fn other_keys(docs: &[SearchDocument]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for doc in docs {
        for key in doc.keys() {
            if key == KEY_TITLE || UNWEIGHTED_KEYS.contains(&key) {
                continue;
            }
            if seen.insert(key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}

/// Title at its fixed weight, then the other keys sharing the remainder.
pub fn compute_key_weights(docs: &[SearchDocument], config: &IndexerConfig) -> Vec<KeyWeight> {
    let others = other_keys(docs);
    let mut weights = Vec::with_capacity(others.len() + 1);
    weights.push(KeyWeight {
        name: KEY_TITLE.to_string(),
        weight: config.title_weight,
    });

    if others.is_empty() {
        return weights;
    }
    let share = config.content_weight / others.len() as f64;
    weights.extend(others.into_iter().map(|name| KeyWeight {
        name,
        weight: share,
    }));
    weights
}

/// Build the index artifact for `docs`, in order.
pub fn build_search_index(docs: &[SearchDocument], config: &IndexerConfig) -> SearchIndexArtifact {
    let keys = compute_key_weights(docs, config);
    let names = keys.iter().map(|k| k.name.clone()).collect();
    let index = KeyedIndex::build(names, docs);
    tracing::debug!(
        docs = index.len(),
        keys = keys.len(),
        terms = index.terms.len(),
        "built search index"
    );
    SearchIndexArtifact { keys, index }
}

/// Sum of all weights.
pub fn total_weight(keys: &[KeyWeight]) -> f64 {
    keys.iter().map(|k| k.weight).sum()
}
