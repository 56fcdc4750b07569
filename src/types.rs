// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data model shared by the builders, the formatter and the service client.
//!
//! Everything here serializes to the JSON the search service speaks, so the
//! serde attributes are part of the contract. Rename a field and the service
//! will silently ignore it.
//!
//! | Type            | Wire shape                                              |
//! |-----------------|---------------------------------------------------------|
//! | `Field`         | `{name, type, key, searchable, filterable, ...}`        |
//! | `Record`        | flat document, lowercase field names                    |
//! | `GeoPoint`      | GeoJSON `{"type":"Point","coordinates":[lon, lat]}`     |
//! | `IndexBatch`    | `{"value":[{"@search.action":"upload", ...record}]}`    |
//! | `ResultSet`     | `{"@odata.count", "@search.facets", "value":[...]}`     |
//!
//! # Invariants
//!
//! - **Schema**: exactly one `Field` has `key = true`.
//! - **Record**: `key` is unique within an index. Every other field may be absent;
//!   absence is meaningful (projections leave unselected fields unset).
//! - **GeoPoint**: latitude in `[-90, 90]`, longitude in `[-180, 180]`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::scoring::ScoringProfile;

// =============================================================================
// SCHEMA
// =============================================================================

/// Data type of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "Edm.String")]
    String,
    #[serde(rename = "Edm.Int32")]
    Int32,
    #[serde(rename = "Edm.DateTimeOffset")]
    DateTimeOffset,
    #[serde(rename = "Edm.GeographyPoint")]
    GeographyPoint,
    #[serde(rename = "Collection(Edm.String)")]
    StringCollection,
}

/// One field of an index schema with its indexing attributes.
///
/// The flags decide which query operations are legal against the field:
/// search text only hits `searchable` fields, `$select` only returns
/// `retrievable` ones, facets require `facetable`, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub key: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub facetable: bool,
    #[serde(default)]
    pub retrievable: bool,
}

/// Auto-completion configuration attached to an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggester {
    pub name: String,
    pub search_mode: String,
    pub source_fields: Vec<String>,
}

/// Full index definition as sent to the create-index endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDefinition {
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub suggesters: Vec<Suggester>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scoring_profiles: Vec<ScoringProfile>,
}

/// Index name plus its current document count, for the state banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub name: String,
    pub document_count: u64,
}

// =============================================================================
// GEO POINT
// =============================================================================

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, BuildError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(BuildError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(BuildError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", longitude),
            ));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Parses `"latitude, longitude"` (comma, optional whitespace).
impl FromStr for GeoPoint {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| BuildError::invalid("location", "expected `latitude, longitude`"))?;
        let parse = |name: &str, v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| BuildError::invalid(name, format!("`{}` is not a number", v.trim())))
        };
        GeoPoint::new(parse("latitude", lat)?, parse("longitude", lon)?)
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type")]
    kind: String,
    /// GeoJSON order: longitude first.
    coordinates: [f64; 2],
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = BuildError;

    fn try_from(p: GeoJsonPoint) -> Result<Self, Self::Error> {
        if p.kind != "Point" {
            return Err(BuildError::invalid(
                "geolocation",
                format!("unsupported GeoJSON type `{}`", p.kind),
            ));
        }
        GeoPoint::new(p.coordinates[1], p.coordinates[0])
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(p: GeoPoint) -> Self {
        GeoJsonPoint {
            kind: "Point".to_string(),
            coordinates: [p.longitude, p.latitude],
        }
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// A searchable event. Every field is optional because query projections
/// only return what was selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<GeoPoint>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize"
    )]
    pub dateadded: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Record {
    /// A record with only the key set (what a delete action needs).
    pub fn with_key(key: impl Into<String>) -> Self {
        Record {
            key: Some(key.into()),
            ..Default::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps go out with millisecond precision and a `Z` suffix.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }
}

// =============================================================================
// DOCUMENT BATCHES
// =============================================================================

/// What the service should do with one document of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Insert, or fully replace an existing document with the same key.
    Upload,
    /// Update the given fields of an existing document.
    Merge,
    /// Remove the document with this key.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexAction {
    #[serde(rename = "@search.action")]
    pub action: ActionKind,
    #[serde(flatten)]
    pub record: Record,
}

impl IndexAction {
    pub fn upload(record: Record) -> Self {
        IndexAction {
            action: ActionKind::Upload,
            record,
        }
    }

    pub fn merge(record: Record) -> Self {
        IndexAction {
            action: ActionKind::Merge,
            record,
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        IndexAction {
            action: ActionKind::Delete,
            record: Record::with_key(key),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexBatch {
    #[serde(rename = "value")]
    pub actions: Vec<IndexAction>,
}

impl IndexBatch {
    pub fn new(actions: Vec<IndexAction>) -> Self {
        IndexBatch { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Split into batches of at most `size` actions, preserving order.
    pub fn chunks(&self, size: usize) -> impl Iterator<Item = IndexBatch> + '_ {
        self.actions
            .chunks(size.max(1))
            .map(|c| IndexBatch::new(c.to_vec()))
    }
}

/// A document the service refused within an otherwise accepted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAction {
    pub key: String,
    pub message: String,
}

/// Per-batch outcome. Committed documents stay committed; there is no rollback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: Vec<FailedAction>,
}

impl BatchOutcome {
    pub fn absorb(&mut self, other: BatchOutcome) {
        self.succeeded += other.succeeded;
        self.failed.extend(other.failed);
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// =============================================================================
// RESULT SET
// =============================================================================

/// One hit: the projected record and its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(rename = "@search.score")]
    pub score: f64,
    #[serde(flatten)]
    pub record: Record,
}

/// What a facet bucket covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetValue {
    /// A single distinct value.
    Value(String),
    /// A range; at least one side is normally present.
    Range {
        from: Option<String>,
        to: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFacetBucket", into = "RawFacetBucket")]
pub struct FacetBucket {
    pub value: FacetValue,
    pub count: u64,
}

impl FacetBucket {
    pub fn value(value: impl Into<String>, count: u64) -> Self {
        FacetBucket {
            value: FacetValue::Value(value.into()),
            count,
        }
    }

    pub fn range(from: Option<String>, to: Option<String>, count: u64) -> Self {
        FacetBucket {
            value: FacetValue::Range { from, to },
            count,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawFacetBucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<serde_json::Value>,
    #[serde(default)]
    count: u64,
}

/// Strings render bare, everything else through its JSON form.
fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl From<RawFacetBucket> for FacetBucket {
    fn from(raw: RawFacetBucket) -> Self {
        let value = match raw.value.and_then(scalar_text) {
            Some(v) => FacetValue::Value(v),
            None => FacetValue::Range {
                from: raw.from.and_then(scalar_text),
                to: raw.to.and_then(scalar_text),
            },
        };
        FacetBucket {
            value,
            count: raw.count,
        }
    }
}

impl From<FacetBucket> for RawFacetBucket {
    fn from(bucket: FacetBucket) -> Self {
        let (value, from, to) = match bucket.value {
            FacetValue::Value(v) => (Some(serde_json::Value::String(v)), None, None),
            FacetValue::Range { from, to } => (
                None,
                from.map(serde_json::Value::String),
                to.map(serde_json::Value::String),
            ),
        };
        RawFacetBucket {
            value,
            from,
            to,
            count: bucket.count,
        }
    }
}

/// Ranked hits plus optional facets and total count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Present only when the query asked for it.
    #[serde(rename = "@odata.count", default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Facet field → buckets in the order the service returned them.
    #[serde(rename = "@search.facets", default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<BTreeMap<String, Vec<FacetBucket>>>,
    #[serde(rename = "value", default)]
    pub results: Vec<ScoredRecord>,
}
