// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow out of flattening and into the index.
//!
//! | Type             | Produced by        | Consumed by                  |
//! |------------------|--------------------|------------------------------|
//! | `TextEntry`      | recursive walk     | component key assembly       |
//! | `SearchDocument` | flattener          | index builder                |
//! | `MetaEntry`      | flattener          | metadata artifact            |
//! | `KeyWeight`      | index builder      | search index artifact        |
//!
//! `SearchDocument` is deliberately not a struct. Its key set varies per
//! document (`component_hero_0`, `paragraph_3`, ...) so it is an
//! insertion-ordered map with typed accessors. Insertion order is also the
//! serialization order, which keeps the artifacts byte-stable across runs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys every `SearchDocument` carries.
pub const KEY_ID: &str = "id";
pub const KEY_TITLE: &str = "title";
pub const KEY_URL: &str = "url";

/// Keys that never take part in index weighting.
pub const UNWEIGHTED_KEYS: &[&str] = &[KEY_ID, KEY_URL];

/// One classified piece of human text and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    /// Dotted/indexed location, e.g. `blocks[2].cards[0].title`
    pub key_path: String,
    pub text: String,
}

/// A blog tag as shown in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogTag {
    pub name: String,
    pub color: String,
}

/// Flattened, search-indexable form of one content document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchDocument {
    fields: Map<String, Value>,
}

impl SearchDocument {
    /// Seed a document with its fixed keys.
    pub fn new(slug: &str, title: &str) -> Self {
        let mut doc = Self::default();
        doc.insert_text(KEY_ID, slug);
        doc.insert_text(KEY_TITLE, title);
        doc.insert_text(KEY_URL, slug);
        doc
    }

    pub fn insert_text(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.fields.insert(key.into(), Value::String(text.into()));
    }

    pub fn insert_tags(&mut self, tags: &[BlogTag]) {
        let value = tags
            .iter()
            .map(|tag| {
                let mut obj = Map::new();
                obj.insert("name".to_string(), Value::String(tag.name.clone()));
                obj.insert("color".to_string(), Value::String(tag.color.clone()));
                Value::Object(obj)
            })
            .collect();
        self.fields.insert("tags".to_string(), Value::Array(value));
    }

    /// String value of `key`, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Non-empty string value of `key`.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.text(key).filter(|s| !s.is_empty())
    }

    pub fn tags(&self) -> Option<Vec<BlogTag>> {
        let items = self.fields.get("tags")?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn id(&self) -> &str {
        self.text(KEY_ID).unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.text(KEY_URL).unwrap_or_default()
    }

    /// Number of `component_*` keys.
    pub fn component_count(&self) -> usize {
        self.keys().filter(|k| k.starts_with("component_")).count()
    }
}

/// Per-document display metadata for the search UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<BlogTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

/// Relative weight of one searchable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyWeight {
    pub name: String,
    pub weight: f64,
}
