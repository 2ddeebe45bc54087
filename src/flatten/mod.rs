// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document flattening: one content file in, one search record out.
//!
//! A page is a list of CMS blocks of arbitrary shape. Flattening walks each
//! block, keeps the strings the classifier accepts, and joins them into one
//! searchable field per block:
//!
//! ```text
//! blocks[0] {_template: hero, title, subtitle, className}  → component_hero_0
//! blocks[1] {_template: cards, cards: [{title, text}, ...]} → component_cards_1
//! blocks[2] {_template: spacer}                             → (too short, no key)
//! ```
//!
//! The component counter only advances for blocks that produce a key, so
//! numbering is dense. Pages without any qualifying block fall back to
//! `paragraph_<j>` keys split from the body.
//!
//! The blog header block is additionally mined for structured metadata
//! (see [`blog`]), and the finished record yields the display metadata
//! (see [`meta`]).

pub mod blog;
pub mod meta;

use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::classify::{clean_string, classify, is_non_text_key};
use crate::config::IndexerConfig;
use crate::content::{path_to_slug, ContentDocument};
use crate::types::{MetaEntry, SearchDocument, TextEntry};
use crate::utils::{char_len, collapse_whitespace};

pub use blog::{find_blog_header, BlogHeader};
pub use meta::meta_entry;

/// Fields naming a block's template, in priority order.
const TEMPLATE_FIELDS: &[&str] = &["_template", "variant", "template"];

/// SEO fields copied onto the document under their own names.
const SEO_FIELDS: &[&str] = &["metaTitle", "metaDescription"];

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("blank line pattern"));

/// `component_hero_0`
pub fn component_key(template: &str, index: usize) -> String {
    format!("component_{}_{}", template, index)
}

/// `paragraph_0`
pub fn paragraph_key(index: usize) -> String {
    format!("paragraph_{}", index)
}

/// Template name declared by a block, if any.
pub fn template_name(block: &Value) -> Option<&str> {
    TEMPLATE_FIELDS
        .iter()
        .find_map(|field| {
            block
                .get(*field)
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
        })
}

/// Collect every accepted string under `value`.
///
/// `path` prefixes the key paths of the produced entries. Strings inside
/// arrays are classified under the nearest enclosing object key; a
/// deny-listed key drops its whole subtree.
pub fn extract_text_entries(value: &Value, path: &str, prose_min_len: usize) -> Vec<TextEntry> {
    let mut entries = Vec::new();
    walk(value, path, None, prose_min_len, &mut entries);
    entries
}

fn walk(
    value: &Value,
    path: &str,
    key: Option<&str>,
    prose_min_len: usize,
    out: &mut Vec<TextEntry>,
) {
    match value {
        Value::String(raw) => {
            let Some(key) = key else { return };
            if let Some(text) = classify(key, raw, prose_min_len) {
                out.push(TextEntry {
                    key_path: path.to_string(),
                    text,
                });
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &format!("{}[{}]", path, i), key, prose_min_len, out);
            }
        }
        Value::Object(map) => {
            for (child_key, child) in map {
                if is_non_text_key(child_key) {
                    continue;
                }
                let child_path = if path.is_empty() {
                    child_key.clone()
                } else {
                    format!("{}.{}", path, child_key)
                };
                walk(child, &child_path, Some(child_key), prose_min_len, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Body split on blank lines, each paragraph cleaned, empties dropped.
pub fn split_paragraphs(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    BLANK_LINE
        .split(&body)
        .map(clean_string)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Turns parsed content documents into search records.
#[derive(Debug, Clone)]
pub struct Flattener<'a> {
    config: &'a IndexerConfig,
    content_root: PathBuf,
}

impl<'a> Flattener<'a> {
    pub fn new(config: &'a IndexerConfig) -> Self {
        Self {
            config,
            content_root: config.content_root(),
        }
    }

    /// Slugs are derived relative to `content_root` instead of the configured one.
    pub fn with_content_root(config: &'a IndexerConfig, content_root: &Path) -> Self {
        Self {
            config,
            content_root: content_root.to_path_buf(),
        }
    }

    /// Flatten one document into its search record and display metadata.
    pub fn flatten(&self, doc: &ContentDocument) -> (SearchDocument, MetaEntry) {
        let search = self.flatten_document(doc);
        let meta = meta_entry(&search);
        (search, meta)
    }

    pub fn flatten_document(&self, doc: &ContentDocument) -> SearchDocument {
        let config = self.config;
        let slug = path_to_slug(&doc.path, &self.content_root);
        let mut out = SearchDocument::new(&slug, &doc.title());

        for field in SEO_FIELDS {
            if let Some(raw) = doc.seo(field) {
                let text = clean_string(raw);
                if !text.is_empty() {
                    out.insert_text(*field, text);
                }
            }
        }

        let blocks = doc.blocks();
        if let Some(header) = find_blog_header(blocks, &config.blog_header_template) {
            BlogHeader::extract(header, &config.default_tag_color).apply(&mut out);
        }

        let body = clean_string(&doc.body);
        let has_body = char_len(&body) > config.min_body_len;
        if has_body {
            out.insert_text("mdx_body", body);
        }

        let components = self.insert_components(blocks, &mut out);

        if components == 0 && has_body {
            for (j, paragraph) in split_paragraphs(&doc.body)
                .into_iter()
                .take(config.max_paragraphs)
                .enumerate()
            {
                out.insert_text(paragraph_key(j), paragraph);
            }
        }

        out
    }

    /// One `component_*` key per qualifying block. Returns how many were added.
    fn insert_components(&self, blocks: &[Value], out: &mut SearchDocument) -> usize {
        let config = self.config;
        let mut count = 0;

        for (i, block) in blocks.iter().enumerate() {
            if count >= config.max_components {
                tracing::debug!(
                    id = out.id(),
                    skipped = blocks.len() - i,
                    "component cap reached"
                );
                break;
            }

            let entries =
                extract_text_entries(block, &format!("blocks[{}]", i), config.prose_min_len);
            if entries.is_empty() {
                continue;
            }
            let joined = entries
                .iter()
                .map(|e| e.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let text = collapse_whitespace(&joined);

            if char_len(&text) > config.min_component_len {
                let template = template_name(block).unwrap_or(config.default_template.as_str());
                out.insert_text(component_key(template, count), text);
                count += 1;
            }
        }

        count
    }
}
