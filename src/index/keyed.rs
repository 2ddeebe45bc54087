//! Keyed full-text index.
//!
//! One record per document holds the normalized value of each weighted key;
//! a term dictionary maps every token to the `(doc, key)` pairs it occurs in.
//!
//! # Invariants
//!
//! 1. **KEY_ORDER**: `keys` has the order of the artifact's key weights
//! 2. **POSTINGS_SORTED**: each posting list is sorted by `(doc, key)`, no duplicates
//! 3. **DOC_FREQ**: `doc_freq` equals the number of distinct docs in the postings
//! 4. **NON_EMPTY**: every term has at least one posting
//!
//! Terms live in a `BTreeMap`, so serialization order never depends on hashing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::types::SearchDocument;
use crate::utils::normalize;

/// Normalized value of one key in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub v: String,
    /// Field-length norm, `1/sqrt(tokens)`
    pub n: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub i: usize,
    /// Key index → value
    #[serde(rename = "$")]
    pub fields: BTreeMap<usize, FieldValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Posting {
    pub doc: usize,
    pub key: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub doc_freq: usize,
    pub postings: Vec<Posting>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyedIndex {
    pub keys: Vec<String>,
    pub records: Vec<IndexRecord>,
    pub terms: BTreeMap<String, TermEntry>,
}

fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Normalized tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(is_word_boundary)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// `1/sqrt(tokens)`, rounded to three decimals.
pub fn field_norm(token_count: usize) -> f64 {
    if token_count == 0 {
        return 0.0;
    }
    let norm = 1.0 / (token_count as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}

/// Indexable text of a document value. Tag lists index their names.
fn indexable_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let names: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("name").and_then(serde_json::Value::as_str))
                .collect();
            (!names.is_empty()).then(|| names.join(" "))
        }
        _ => None,
    }
}

type DocTerms = BTreeMap<String, Vec<Posting>>;

/// Record and per-document term postings for one document.
fn index_document(
    doc_id: usize,
    doc: &SearchDocument,
    key_ids: &HashMap<&str, usize>,
) -> (IndexRecord, DocTerms) {
    let mut fields = BTreeMap::new();
    let mut terms: DocTerms = BTreeMap::new();

    for (name, value) in doc.iter() {
        let Some(&key) = key_ids.get(name) else {
            continue;
        };
        let Some(text) = indexable_text(value) else {
            continue;
        };
        let tokens = tokenize(&text);
        if tokens.is_empty() {
            continue;
        }

        fields.insert(
            key,
            FieldValue {
                v: normalize(&text),
                n: field_norm(tokens.len()),
            },
        );
        for token in tokens {
            terms.entry(token).or_default().push(Posting { doc: doc_id, key });
        }
    }

    (IndexRecord { i: doc_id, fields }, terms)
}

impl KeyedIndex {
    /// Index `docs` under `keys`. Document values under other keys are ignored.
    pub fn build(keys: Vec<String>, docs: &[SearchDocument]) -> Self {
        let key_ids: HashMap<&str, usize> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();

        // MAP: per-document records and terms
        #[cfg(feature = "parallel")]
        let per_doc: Vec<(IndexRecord, DocTerms)> = docs
            .par_iter()
            .enumerate()
            .map(|(doc_id, doc)| index_document(doc_id, doc, &key_ids))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let per_doc: Vec<(IndexRecord, DocTerms)> = docs
            .iter()
            .enumerate()
            .map(|(doc_id, doc)| index_document(doc_id, doc, &key_ids))
            .collect();

        // REDUCE: merge in document order
        let mut records = Vec::with_capacity(per_doc.len());
        let mut merged: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        for (record, doc_terms) in per_doc {
            records.push(record);
            for (term, postings) in doc_terms {
                merged.entry(term).or_default().extend(postings);
            }
        }

        let terms = merged
            .into_iter()
            .map(|(term, mut postings)| {
                // INVARIANT: POSTINGS_SORTED
                postings.sort_unstable();
                postings.dedup();
                let mut docs: Vec<usize> = postings.iter().map(|p| p.doc).collect();
                docs.dedup();
                (
                    term,
                    TermEntry {
                        doc_freq: docs.len(),
                        postings,
                    },
                )
            })
            .collect();

        Self {
            keys,
            records,
            terms,
        }
    }

    /// Postings of a query term, normalized the way values are.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.terms
            .get(&normalize(term))
            .map(|entry| entry.postings.as_slice())
            .unwrap_or_default()
    }

    pub fn key_index(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == name)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
