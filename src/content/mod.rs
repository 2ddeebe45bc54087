// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Content input: finding documents and splitting them into front-matter and body.

pub mod discovery;
pub mod parser;

pub use discovery::*;
pub use parser::*;
