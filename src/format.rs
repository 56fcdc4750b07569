// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plain-text rendering of result sets and documents.
//!
//! Output is deterministic and colour-free so it can be compared against
//! golden text. Unset or blank record fields are skipped, never rendered empty.
//!
//! ```text
//! Results: 2/42
//! **********************************************************
//! Score: 1.5
//!     Key: 0b6f...
//!     Name: Packers vs Bears
//! ----------------------------------------------------------
//! Facets:
//! rating
//!     5 (3)
//! date
//!     <2026-10-26T12:00:00Z (7)
//!     2026-10-26T12:00:00Z - 2026-11-05T12:00:00Z (2)
//!     >2026-11-05T12:00:00Z (9)
//! **********************************************************
//! ```
//!
//! (indented lines start with a tab)

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::{FacetBucket, FacetValue, Record, ResultSet};

const STARS: &str = "**********************************************************";
const DASHES: &str = "----------------------------------------------------------";

/// Render a result set: header, hits, then facets if any were returned.
pub fn format_results(results: &ResultSet) -> String {
    let mut lines = Vec::new();

    let total = results
        .total_count
        .map_or_else(|| "?".to_string(), |t| t.to_string());
    lines.push(format!("Results: {}/{}", results.results.len(), total));
    lines.push(STARS.to_string());

    for hit in &results.results {
        lines.push(format!("Score: {}", hit.score));
        lines.extend(record_lines(&hit.record));
    }

    if let Some(facets) = &results.facets {
        lines.push(DASHES.to_string());
        lines.push("Facets:".to_string());
        for (field, buckets) in facets {
            lines.push(field.clone());
            lines.extend(buckets.iter().map(|b| format!("\t{}", bucket_text(b))));
        }
    }

    lines.push(STARS.to_string());
    lines.join("\n")
}

/// Render a single document (document lookup).
pub fn format_record(record: &Record) -> String {
    record_lines(record).join("\n")
}

/// One tab-indented `Label: value` line per non-empty field, in fixed order.
pub fn record_lines(record: &Record) -> Vec<String> {
    let text = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

    let fields: [(&str, Option<String>); 10] = [
        ("Key", text(&record.key)),
        ("Name", text(&record.name)),
        ("Date", record.date.map(timestamp)),
        ("DateAdded", record.dateadded.map(timestamp)),
        ("Category", text(&record.category)),
        ("Description", text(&record.description)),
        ("Location", text(&record.location)),
        ("Geolocation", record.geolocation.map(|p| p.to_string())),
        ("Rating", record.rating.map(|r| r.to_string())),
        (
            "Tags",
            (!record.tags.is_empty()).then(|| record.tags.join(", ")),
        ),
    ];

    fields
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("\t{}: {}", label, v)))
        .collect()
}

/// `value (count)` with the value rendered by [`facet_value_text`].
pub fn bucket_text(bucket: &FacetBucket) -> String {
    format!("{} ({})", facet_value_text(&bucket.value), bucket.count)
}

/// Single value, `X - Y`, `>X` or `<Y`.
pub fn facet_value_text(value: &FacetValue) -> String {
    match value {
        FacetValue::Value(v) => v.clone(),
        FacetValue::Range {
            from: Some(from),
            to: Some(to),
        } => format!("{} - {}", from, to),
        FacetValue::Range {
            from: Some(from),
            to: None,
        } => format!(">{}", from),
        FacetValue::Range {
            from: None,
            to: Some(to),
        } => format!("<{}", to),
        FacetValue::Range {
            from: None,
            to: None,
        } => "*".to_string(),
    }
}

fn timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
