// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for flattening arbitrary block trees.
//!
//! The fuzzer builds nested blocks out of a small key vocabulary so that
//! allow-listed, deny-listed and unknown keys all show up often. Flattening
//! must never panic, and the produced record must respect the component cap.

#![no_main]

use arbitrary::Arbitrary;
use blockdex::testing::make_doc;
use blockdex::{Flattener, IndexerConfig};
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Map, Value};
use std::path::Path;

const KEYS: &[&str] = &[
    "_template",
    "variant",
    "title",
    "subtitle",
    "text",
    "cards",
    "className",
    "image",
    "blog_header_title",
    "blog_header_date",
    "blog_header_read_time",
    "blog_header_tags",
    "misc",
];

/// One node of a generated block tree.
#[derive(Debug, Arbitrary)]
enum Node {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Node>),
    Object(Vec<(u8, Node)>),
}

#[derive(Debug, Arbitrary)]
struct PageInput {
    title: Option<String>,
    draft: bool,
    blocks: Vec<Node>,
    body: String,
}

fn to_value(node: &Node, depth: usize) -> Value {
    if depth > 6 {
        return Value::Null;
    }
    match node {
        Node::Null => Value::Null,
        Node::Bool(b) => json!(b),
        Node::Number(n) => json!(n),
        Node::Text(s) => json!(s),
        Node::List(items) => items.iter().map(|n| to_value(n, depth + 1)).collect(),
        Node::Object(fields) => {
            let map: Map<String, Value> = fields
                .iter()
                .map(|(k, n)| {
                    let key = KEYS[*k as usize % KEYS.len()].to_string();
                    (key, to_value(n, depth + 1))
                })
                .collect();
            Value::Object(map)
        }
    }
}

fuzz_target!(|input: PageInput| {
    let blocks: Vec<Value> = input.blocks.iter().map(|n| to_value(n, 0)).collect();
    let front_matter = json!({
        "title": input.title,
        "draft": input.draft,
        "blocks": blocks,
    });

    let config = IndexerConfig {
        max_components: 8,
        ..IndexerConfig::default()
    };
    let flattener = Flattener::with_content_root(&config, Path::new("content/pages"));
    let (doc, meta) = flattener.flatten(&make_doc("fuzz", front_matter, &input.body));

    assert!(doc.component_count() <= 8);
    assert_eq!(doc.id(), "/blog/fuzz");
    assert_eq!(meta.id, doc.id());
    assert!(!meta.title.is_empty());
});
