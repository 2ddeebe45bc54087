// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `blockdex inspect`: decode both artifacts and show what the client will load.

use std::path::Path;

use blockdex::build::{read_artifacts, LoadedArtifacts};
use blockdex::error::{IndexerError, Result};
use blockdex::index::total_weight;

use super::display::{
    check_mark, format_size, key_name, pad_left, pad_right, row, savings_colored, section_bot,
    section_mid, section_top, weight_value,
};

/// Keys listed before the rest are summarized.
const MAX_LISTED_KEYS: usize = 24;

pub fn run_inspect(dir: &Path, index_file: &str, meta_file: &str) -> Result<()> {
    let loaded = read_artifacts(&dir.join(index_file), &dir.join(meta_file))?;

    print_report(&loaded);

    if !loaded.weights_valid() {
        return Err(IndexerError::Artifact {
            path: loaded.index_path.clone(),
            message: format!(
                "key weights sum to {}, expected 1.0",
                total_weight(&loaded.index.keys)
            ),
        });
    }
    if !loaded.counts_match() {
        return Err(IndexerError::Artifact {
            path: loaded.meta_path.clone(),
            message: format!(
                "{} metadata entries for {} indexed documents",
                loaded.meta.len(),
                loaded.index.index.len()
            ),
        });
    }
    Ok(())
}

fn size_row(label: &str, (compressed, raw): (usize, usize)) {
    row(&format!(
        "  {} {} → {}  {}",
        pad_right(label, 8),
        pad_left(&format_size(raw), 9),
        pad_left(&format_size(compressed), 9),
        savings_colored(raw, compressed)
    ));
}

fn print_report(loaded: &LoadedArtifacts) {
    let keys = &loaded.index.keys;

    section_top("ARTIFACTS");
    size_row("index", loaded.index_size);
    size_row("meta", loaded.meta_size);

    section_mid("CONTENTS");
    row(&format!("  documents     {}", loaded.index.index.len()));
    row(&format!("  meta entries  {}  {}", loaded.meta.len(), check_mark(loaded.counts_match())));
    row(&format!("  terms         {}", loaded.index.index.terms.len()));
    row(&format!("  keys          {}", keys.len()));

    section_mid("KEY WEIGHTS");
    for key in keys.iter().take(MAX_LISTED_KEYS) {
        row(&format!(
            "  {} {}",
            weight_value(&key.name, key.weight),
            key_name(&key.name)
        ));
    }
    if keys.len() > MAX_LISTED_KEYS {
        row(&format!("  … {} more", keys.len() - MAX_LISTED_KEYS));
    }
    row(&format!(
        "  {:>8.4} total  {}",
        total_weight(keys),
        check_mark(loaded.weights_valid())
    ));
    section_bot();
}
