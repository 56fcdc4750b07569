// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The event index schema.
//!
//! The flag matrix decides what the service lets a query do with each field.
//!
//! | Field         | Type                     | S | F | So | Fa | R | Key |
//! |---------------|--------------------------|---|---|----|----|---|-----|
//! | `key`         | `Edm.String`             | ✓ | ✓ | ✓  | ✓  | ✓ | ✓   |
//! | `name`        | `Edm.String`             | ✓ |   | ✓  | ✓  | ✓ |     |
//! | `category`    | `Edm.String`             | ✓ | ✓ | ✓  | ✓  | ✓ |     |
//! | `description` | `Edm.String`             | ✓ | ✓ | ✓  | ✓  | ✓ |     |
//! | `location`    | `Edm.String`             | ✓ | ✓ | ✓  | ✓  | ✓ |     |
//! | `date`        | `Edm.DateTimeOffset`     |   | ✓ | ✓  | ✓  | ✓ |     |
//! | `tags`        | `Collection(Edm.String)` | ✓ | ✓ |    | ✓  | ✓ |     |
//! | `geolocation` | `Edm.GeographyPoint`     |   | ✓ | ✓  |    | ✓ |     |
//! | `dateadded`   | `Edm.DateTimeOffset`     |   | ✓ | ✓  | ✓  | ✓ |     |
//! | `rating`      | `Edm.Int32`              |   | ✓ | ✓  | ✓  | ✓ |     |
//!
//! S = searchable, F = filterable, So = sortable, Fa = facetable, R = retrievable.

use crate::types::{DataType, Field, IndexDefinition, Suggester};

pub const KEY: &str = "key";
pub const NAME: &str = "name";
pub const CATEGORY: &str = "category";
pub const DESCRIPTION: &str = "description";
pub const LOCATION: &str = "location";
pub const DATE: &str = "date";
pub const TAGS: &str = "tags";
pub const GEOLOCATION: &str = "geolocation";
pub const DATE_ADDED: &str = "dateadded";
pub const RATING: &str = "rating";

/// Suggester name used by the index.
pub const SUGGESTER_NAME: &str = "sg";

// Flag order: searchable, filterable, sortable, facetable, retrievable.
const fn field(
    name: &'static str,
    data_type: DataType,
    flags: [bool; 5],
) -> (&'static str, DataType, [bool; 5]) {
    (name, data_type, flags)
}

const SCHEMA: [(&str, DataType, [bool; 5]); 10] = [
    field(KEY, DataType::String, [true, true, true, true, true]),
    field(NAME, DataType::String, [true, false, true, true, true]),
    field(CATEGORY, DataType::String, [true, true, true, true, true]),
    field(DESCRIPTION, DataType::String, [true, true, true, true, true]),
    field(LOCATION, DataType::String, [true, true, true, true, true]),
    field(DATE, DataType::DateTimeOffset, [false, true, true, true, true]),
    field(TAGS, DataType::StringCollection, [true, true, false, true, true]),
    field(GEOLOCATION, DataType::GeographyPoint, [false, true, true, false, true]),
    field(DATE_ADDED, DataType::DateTimeOffset, [false, true, true, true, true]),
    field(RATING, DataType::Int32, [false, true, true, true, true]),
];

/// The fields of a searchable event, in schema order.
pub fn build_schema() -> Vec<Field> {
    SCHEMA
        .iter()
        .map(|&(name, data_type, [searchable, filterable, sortable, facetable, retrievable])| Field {
            name: name.to_string(),
            data_type,
            key: name == KEY,
            searchable,
            filterable,
            sortable,
            facetable,
            retrievable,
        })
        .collect()
}

/// Infix auto-completion over event names.
pub fn event_suggester() -> Suggester {
    Suggester {
        name: SUGGESTER_NAME.to_string(),
        search_mode: "analyzingInfixMatching".to_string(),
        source_fields: vec![NAME.to_string()],
    }
}

/// Index definition for a fresh event index. No scoring profiles yet;
/// those are added by the profile-update operations.
pub fn index_definition(name: &str) -> IndexDefinition {
    IndexDefinition {
        name: name.to_string(),
        fields: build_schema(),
        suggesters: vec![event_suggester()],
        scoring_profiles: Vec::new(),
    }
}

/// Look up a field of [`build_schema`] by name.
pub fn find_field(schema: &[Field], name: &str) -> Option<Field> {
    schema.iter().find(|f| f.name == name).cloned()
}
