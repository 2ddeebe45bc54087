// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for text cleaning and classification.

#![no_main]

use blockdex::classify::{clean_string, classify, looks_like_non_text};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (key, value) = input;

    let cleaned = clean_string(value);
    assert_eq!(cleaned.trim(), cleaned);
    assert!(!cleaned.contains("  "));

    if let Some(text) = classify(key, value, 30) {
        assert!(!looks_like_non_text(&text));
    }
});
