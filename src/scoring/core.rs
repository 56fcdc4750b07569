// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring function and profile definitions in the service's wire shape.
//!
//! ```text
//! {
//!   "name": "default",
//!   "functionAggregation": "sum",
//!   "functions": [
//!     { "type": "freshness", "fieldName": "dateadded", "boost": 200,
//!       "interpolation": "logarithmic", "freshness": { "boostingDuration": "PT5M" } },
//!     { "type": "tag", "fieldName": "tags", "boost": 500,
//!       "interpolation": "linear", "tag": { "tagsParameter": "tagsParameter" } }
//!   ]
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shape of the boost curve between "no boost" and "full boost".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Linear,
    Constant,
    Quadratic,
    Logarithmic,
}

/// How function results combine within a profile. We always build `Sum`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    #[default]
    Sum,
    Average,
    Minimum,
    Maximum,
    FirstMatching,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessParams {
    /// Half-life of the boost; documents older than this get little of it.
    #[serde(with = "iso8601")]
    pub boosting_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceParams {
    /// Name of the query-time parameter carrying the reference point.
    pub reference_point_parameter: String,
    /// Kilometres from the reference point where the boost ends.
    pub boosting_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagParams {
    /// Name of the query-time parameter carrying the tags to match.
    pub tags_parameter: String,
}

/// One boost function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScoringFunction {
    Freshness {
        #[serde(rename = "fieldName")]
        field_name: String,
        boost: f64,
        interpolation: Interpolation,
        freshness: FreshnessParams,
    },
    Distance {
        #[serde(rename = "fieldName")]
        field_name: String,
        boost: f64,
        interpolation: Interpolation,
        distance: DistanceParams,
    },
    Tag {
        #[serde(rename = "fieldName")]
        field_name: String,
        boost: f64,
        interpolation: Interpolation,
        tag: TagParams,
    },
}

impl ScoringFunction {
    pub fn field_name(&self) -> &str {
        match self {
            ScoringFunction::Freshness { field_name, .. }
            | ScoringFunction::Distance { field_name, .. }
            | ScoringFunction::Tag { field_name, .. } => field_name,
        }
    }

    pub fn boost(&self) -> f64 {
        match self {
            ScoringFunction::Freshness { boost, .. }
            | ScoringFunction::Distance { boost, .. }
            | ScoringFunction::Tag { boost, .. } => *boost,
        }
    }

    pub fn interpolation(&self) -> Interpolation {
        match self {
            ScoringFunction::Freshness { interpolation, .. }
            | ScoringFunction::Distance { interpolation, .. }
            | ScoringFunction::Tag { interpolation, .. } => *interpolation,
        }
    }

    /// The query-time parameter this function reads, if any.
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            ScoringFunction::Freshness { .. } => None,
            ScoringFunction::Distance { distance, .. } => Some(&distance.reference_point_parameter),
            ScoringFunction::Tag { tag, .. } => Some(&tag.tags_parameter),
        }
    }
}

/// A named list of boost functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringProfile {
    pub name: String,
    #[serde(default)]
    pub function_aggregation: Aggregation,
    pub functions: Vec<ScoringFunction>,
}

impl ScoringProfile {
    /// Parameter names a query must supply when selecting this profile.
    pub fn required_parameters(&self) -> Vec<&str> {
        self.functions
            .iter()
            .filter_map(ScoringFunction::parameter_name)
            .collect()
    }
}

/// ISO-8601 durations restricted to days, hours, minutes and whole seconds.
pub(crate) mod iso8601 {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(d: Duration) -> String {
        let mut secs = d.as_secs();
        if secs == 0 {
            return "PT0S".to_string();
        }
        let days = secs / 86_400;
        secs %= 86_400;
        let mut out = String::from("P");
        if days > 0 {
            out.push_str(&format!("{}D", days));
        }
        if secs > 0 {
            out.push('T');
            let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
            if h > 0 {
                out.push_str(&format!("{}H", h));
            }
            if m > 0 {
                out.push_str(&format!("{}M", m));
            }
            if s > 0 {
                out.push_str(&format!("{}S", s));
            }
        }
        out
    }

    pub fn parse(s: &str) -> Option<Duration> {
        let rest = s.strip_prefix('P')?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (rest, None),
        };
        let mut total = 0u64;
        let mut consume = |part: &str, units: &[(char, u64)]| -> Option<()> {
            let mut digits = String::new();
            for c in part.chars() {
                if c.is_ascii_digit() {
                    digits.push(c);
                } else {
                    let (_, mult) = units.iter().find(|(u, _)| *u == c)?;
                    total += digits.parse::<u64>().ok()? * mult;
                    digits.clear();
                }
            }
            digits.is_empty().then_some(())
        };
        consume(date_part, &[('D', 86_400)])?;
        if let Some(t) = time_part {
            if t.is_empty() {
                return None;
            }
            consume(t, &[('H', 3600), ('M', 60), ('S', 1)])?;
        }
        Some(Duration::from_secs(total))
    }

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("unsupported duration `{}`", s)))
    }
}
