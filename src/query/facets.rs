// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Facet requests and their expression syntax.
//!
//! The service takes facets as strings: `field,param:value,...`.
//! Numeric and date fields bucketed by explicit boundaries use
//! `field,values:b1|b2|...` and get back `< b1`, `b1 - b2`, ..., `> bn`.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::schema;

/// Default number of distinct values returned by a terms facet.
pub const DEFAULT_TERMS_COUNT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetSort {
    /// Most frequent first.
    Count,
    /// By value, ascending.
    Value,
}

impl FacetSort {
    fn as_str(self) -> &'static str {
        match self {
            FacetSort::Count => "count",
            FacetSort::Value => "value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetBoundary {
    Number(i64),
    Timestamp(DateTime<Utc>),
}

impl FacetBoundary {
    fn render(&self) -> String {
        match self {
            FacetBoundary::Number(n) => n.to_string(),
            FacetBoundary::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// One requested facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetSpec {
    /// Top `count` distinct values of the field.
    Terms {
        field: String,
        count: u32,
        sort: FacetSort,
    },
    /// Range buckets split at explicit boundaries (ascending).
    Values {
        field: String,
        boundaries: Vec<FacetBoundary>,
    },
}

impl FacetSpec {
    pub fn field(&self) -> &str {
        match self {
            FacetSpec::Terms { field, .. } | FacetSpec::Values { field, .. } => field,
        }
    }

    /// The facet expression as the service expects it.
    pub fn expression(&self) -> String {
        match self {
            FacetSpec::Terms { field, count, sort } => {
                format!("{},count:{},sort:{}", field, count, sort.as_str())
            }
            FacetSpec::Values { field, boundaries } => {
                let values: Vec<String> = boundaries.iter().map(FacetBoundary::render).collect();
                format!("{},values:{}", field, values.join("|"))
            }
        }
    }

    /// Boundaries must be non-empty, of one kind, and strictly ascending.
    pub(crate) fn boundaries_valid(&self) -> bool {
        match self {
            FacetSpec::Terms { count, .. } => *count > 0,
            FacetSpec::Values { boundaries, .. } => {
                !boundaries.is_empty()
                    && boundaries.windows(2).all(|w| match (w[0], w[1]) {
                        (FacetBoundary::Number(a), FacetBoundary::Number(b)) => a < b,
                        (FacetBoundary::Timestamp(a), FacetBoundary::Timestamp(b)) => a < b,
                        _ => false,
                    })
            }
        }
    }
}

/// Five most common ratings.
pub fn rating_facet() -> FacetSpec {
    FacetSpec::Terms {
        field: schema::RATING.to_string(),
        count: DEFAULT_TERMS_COUNT,
        sort: FacetSort::Count,
    }
}

/// Event dates split into "within 10 days", "10 to 20 days", "later".
/// Boundaries are computed from `now`, so two builds can differ.
pub fn date_facet(now: DateTime<Utc>) -> FacetSpec {
    FacetSpec::Values {
        field: schema::DATE.to_string(),
        boundaries: vec![
            FacetBoundary::Timestamp(now + Duration::days(10)),
            FacetBoundary::Timestamp(now + Duration::days(20)),
        ],
    }
}
