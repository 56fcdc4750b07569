// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search response handling.
//!
//! Feeds arbitrary bytes through the same decode path the REST adapter uses
//! for search responses and document lookups, then renders whatever decoded.
//! Decoding may fail; rendering a decoded value must never panic.

#![no_main]

use eventsearch::{format_record, format_results, Record, ResultSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(results) = serde_json::from_slice::<ResultSet>(data) {
        let out = format_results(&results);
        assert!(out.starts_with("Results: "));
        assert!(out.matches("Score: ").count() >= results.results.len());
    }

    if let Ok(record) = serde_json::from_slice::<Record>(data) {
        let _ = format_record(&record);
    }
});
