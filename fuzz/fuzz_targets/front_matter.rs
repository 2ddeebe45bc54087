// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for front-matter parsing.
//!
//! Content files are authored by hand and by a CMS. Unclosed delimiters,
//! tabs in YAML, BOMs and CRLF all show up in practice. Parsing may reject a
//! file but must never panic, and an accepted file always has an object as
//! front-matter.

#![no_main]

use blockdex::ContentDocument;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(doc) = ContentDocument::parse(Path::new("fuzz/page.mdx"), source) {
        assert!(doc.front_matter.is_object());
        assert!(doc.body.len() <= source.len());
        let _ = doc.is_draft();
        let _ = doc.title();
        let _ = doc.blocks();
    }
});
