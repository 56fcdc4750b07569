//! Result formatter properties.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use eventsearch::format::{format_results, record_lines};
use eventsearch::types::{FacetBucket, ScoredRecord};
use eventsearch::{GeoPoint, Record, ResultSet};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn opt_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z][A-Za-z ]{0,15}",
    ])
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        (opt_text(), opt_text(), opt_text(), opt_text(), opt_text()),
        prop::option::of((-90.0f64..=90.0, -180.0f64..=180.0)),
        prop::option::of(0i64..4_000_000_000),
        prop::option::of(0i32..=9),
        prop::collection::vec("[a-z]{1,8}", 0..3),
    )
        .prop_map(|((key, name, category, description, location), geo, secs, rating, tags)| {
            let ts = secs.map(|s| Utc.timestamp_opt(s, 0).unwrap());
            Record {
                key,
                name,
                category,
                description,
                location,
                geolocation: geo.map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap()),
                date: ts,
                dateadded: ts,
                rating,
                tags,
            }
        })
}

fn buckets_strategy() -> impl Strategy<Value = Vec<FacetBucket>> {
    prop::collection::vec(("[0-9]{1,2}", 0u64..100), 0..5)
        .prop_map(|v| v.into_iter().map(|(value, count)| FacetBucket::value(value, count)).collect())
}

fn result_set_strategy() -> impl Strategy<Value = ResultSet> {
    (
        prop::option::of(0u64..10_000),
        prop::option::of(prop::collection::btree_map("[a-z]{3,8}", buckets_strategy(), 0..3)),
        prop::collection::vec((0.0f64..100.0, record_strategy()), 0..6),
    )
        .prop_map(|(total_count, facets, hits)| ResultSet {
            total_count,
            facets: facets.map(|f| f.into_iter().collect::<BTreeMap<_, _>>()),
            results: hits
                .into_iter()
                .map(|(score, record)| ScoredRecord { score, record })
                .collect(),
        })
}

fn is_set(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.trim().is_empty())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// A label is printed exactly when its field carries a value.
    #[test]
    fn prop_unset_fields_omitted(record in record_strategy()) {
        let lines = record_lines(&record);
        let has = |label: &str| lines.iter().any(|l| l.starts_with(&format!("\t{}: ", label)));

        prop_assert_eq!(has("Key"), is_set(&record.key));
        prop_assert_eq!(has("Name"), is_set(&record.name));
        prop_assert_eq!(has("Category"), is_set(&record.category));
        prop_assert_eq!(has("Description"), is_set(&record.description));
        prop_assert_eq!(has("Location"), is_set(&record.location));
        prop_assert_eq!(has("Geolocation"), record.geolocation.is_some());
        prop_assert_eq!(has("Date"), record.date.is_some());
        prop_assert_eq!(has("Rating"), record.rating.is_some());
        prop_assert_eq!(has("Tags"), !record.tags.is_empty());
        prop_assert!(lines.iter().all(|l| !l.trim_end().ends_with(':')));
    }

    /// Header, hit count and facet section agree with the result set.
    #[test]
    fn prop_result_layout(rs in result_set_strategy()) {
        let out = format_results(&rs);
        let lines: Vec<&str> = out.lines().collect();

        let total = rs.total_count.map_or_else(|| "?".to_string(), |t| t.to_string());
        prop_assert_eq!(lines[0], format!("Results: {}/{}", rs.results.len(), total));
        prop_assert_eq!(lines.iter().filter(|l| l.starts_with("Score: ")).count(), rs.results.len());
        prop_assert!(lines.last().unwrap().starts_with("****"));

        match &rs.facets {
            None => {
                prop_assert!(!out.contains("Facets:"));
            }
            Some(facets) => {
                prop_assert!(out.contains("\nFacets:\n"));
                let bucket_lines = lines
                    .iter()
                    .skip_while(|l| **l != "Facets:")
                    .filter(|l| l.starts_with('\t'))
                    .count();
                let buckets: usize = facets.values().map(Vec::len).sum();
                prop_assert_eq!(bucket_lines, buckets);
            }
        }
    }
}
