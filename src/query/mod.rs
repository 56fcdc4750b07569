// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query request builder.
//!
//! Six fixed use cases map to complete query requests. Each use case declares
//! the runtime input it needs (if any); [`build_query`] refuses to produce a
//! request when that input is absent instead of sending a scoring-parameter
//! list the service would reject at query time.
//!
//! | # | Use case          | Mode | Select                          | Top | Profile      | Needs          |
//! |---|-------------------|------|---------------------------------|-----|--------------|----------------|
//! | 1 | `SimpleAll`       | ALL  | key, name                       |  –  | –            | –              |
//! | 2 | `SimpleAny`       | ANY  | key, name                       |  –  | –            | –              |
//! | 3 | `Faceted`         | ALL  | key, name, date                 |  –  | –            | –              |
//! | 4 | `FreshnessRanked` | ALL  | key, name, date, dateadded, rating | 10 | `default` | –              |
//! | 5 | `GeoRanked`       | ALL  | key, name, date, location       | 10  | `defaultgeo` | `mylocation`   |
//! | 6 | `TagRanked`       | ALL  | key, name, date, location       | 10  | `default`    | `tagsParameter`|
//!
//! Use cases 3-6 request the rating and date facets.

mod facets;

pub use facets::{date_facet, rating_facet, FacetBoundary, FacetSort, FacetSpec};

use serde::Serialize;

use crate::clock::Clock;
use crate::error::BuildError;
use crate::schema::{self, build_schema, find_field};
use crate::scoring::ranking::{DEFAULT_PROFILE, GEO_PROFILE, LOCATION_PARAMETER, TAGS_PARAMETER};
use crate::types::GeoPoint;

/// Page size for the ranked use cases.
pub const RANKED_PAGE_SIZE: u32 = 10;

/// Whether all or any query terms must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    All,
    Any,
}

/// A value the operator has to supply for a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeInput {
    /// Caller's coordinate for distance boosting.
    Location,
    /// Caller's favourite tag for tag boosting.
    FavoriteTag,
}

impl RuntimeInput {
    /// Name of the scoring parameter this input feeds.
    pub fn parameter_name(self) -> &'static str {
        match self {
            RuntimeInput::Location => LOCATION_PARAMETER,
            RuntimeInput::FavoriteTag => TAGS_PARAMETER,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            RuntimeInput::Location => "Where are you searching from? (latitude, longitude)",
            RuntimeInput::FavoriteTag => "Which is your favourite team?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    SimpleAll,
    SimpleAny,
    Faceted,
    FreshnessRanked,
    GeoRanked,
    TagRanked,
}

impl UseCase {
    pub const ALL: [UseCase; 6] = [
        UseCase::SimpleAll,
        UseCase::SimpleAny,
        UseCase::Faceted,
        UseCase::FreshnessRanked,
        UseCase::GeoRanked,
        UseCase::TagRanked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UseCase::SimpleAll => "ALL (simple)",
            UseCase::SimpleAny => "ANY (simple)",
            UseCase::Faceted => "ALL (with facets)",
            UseCase::FreshnessRanked => "ALL (using scoring profiles)",
            UseCase::GeoRanked => "ALL (using geo-location scoring profile)",
            UseCase::TagRanked => "ALL (using freshness + tag scoring profile)",
        }
    }

    /// The runtime input this use case cannot be built without.
    pub fn required_input(self) -> Option<RuntimeInput> {
        match self {
            UseCase::GeoRanked => Some(RuntimeInput::Location),
            UseCase::TagRanked => Some(RuntimeInput::FavoriteTag),
            _ => None,
        }
    }

    fn search_mode(self) -> SearchMode {
        match self {
            UseCase::SimpleAny => SearchMode::Any,
            _ => SearchMode::All,
        }
    }

    fn select(self) -> &'static [&'static str] {
        use schema::{DATE, DATE_ADDED, KEY, LOCATION, NAME, RATING};
        match self {
            UseCase::SimpleAll | UseCase::SimpleAny => &[KEY, NAME],
            UseCase::Faceted => &[KEY, NAME, DATE],
            UseCase::FreshnessRanked => &[KEY, NAME, DATE, DATE_ADDED, RATING],
            UseCase::GeoRanked | UseCase::TagRanked => &[KEY, NAME, DATE, LOCATION],
        }
    }

    fn scoring_profile(self) -> Option<&'static str> {
        match self {
            UseCase::FreshnessRanked | UseCase::TagRanked => Some(DEFAULT_PROFILE),
            UseCase::GeoRanked => Some(GEO_PROFILE),
            _ => None,
        }
    }

    fn is_ranked(self) -> bool {
        self.scoring_profile().is_some()
    }

    fn has_facets(self) -> bool {
        !matches!(self, UseCase::SimpleAll | UseCase::SimpleAny)
    }
}

/// What the operator typed for this query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeInputs {
    pub search_text: String,
    pub location: Option<GeoPoint>,
    pub favorite_tag: Option<String>,
}

impl RuntimeInputs {
    pub fn new(search_text: impl Into<String>) -> Self {
        RuntimeInputs {
            search_text: search_text.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_favorite_tag(mut self, tag: impl Into<String>) -> Self {
        self.favorite_tag = Some(tag.into());
        self
    }
}

/// A runtime value for a scoring function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringParameter {
    pub name: String,
    pub values: Vec<String>,
}

impl ScoringParameter {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        ScoringParameter {
            name: name.into(),
            values,
        }
    }

    /// `name-value1,value2`; values containing commas are single-quoted.
    pub fn to_wire(&self) -> String {
        let values: Vec<String> = self
            .values
            .iter()
            .map(|v| {
                if v.contains(',') {
                    format!("'{}'", v.replace('\'', "''"))
                } else {
                    v.clone()
                }
            })
            .collect();
        format!("{}-{}", self.name, values.join(","))
    }
}

/// A complete, validated query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub search_text: String,
    pub search_mode: SearchMode,
    pub select: Vec<String>,
    pub facets: Vec<FacetSpec>,
    pub top: Option<u32>,
    pub include_total_count: bool,
    pub scoring_profile: Option<String>,
    pub scoring_parameters: Vec<ScoringParameter>,
}

impl QueryRequest {
    pub fn facet_fields(&self) -> Vec<&str> {
        self.facets.iter().map(FacetSpec::field).collect()
    }

    pub fn scoring_parameter(&self, name: &str) -> Option<&ScoringParameter> {
        self.scoring_parameters.iter().find(|p| p.name == name)
    }

    /// Request body for the search endpoint.
    pub fn to_body(&self) -> SearchBody<'_> {
        let search = self.search_text.trim();
        SearchBody {
            search: if search.is_empty() { "*" } else { search },
            search_mode: self.search_mode,
            count: self.include_total_count,
            select: self.select.join(","),
            facets: self.facets.iter().map(FacetSpec::expression).collect(),
            top: self.top,
            scoring_profile: self.scoring_profile.as_deref(),
            scoring_parameters: self
                .scoring_parameters
                .iter()
                .map(ScoringParameter::to_wire)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody<'a> {
    pub search: &'a str,
    pub search_mode: SearchMode,
    pub count: bool,
    pub select: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_profile: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scoring_parameters: Vec<String>,
}

/// Build the request for a use case.
///
/// Date facet boundaries are taken from `clock` at build time.
pub fn build_query(
    use_case: UseCase,
    inputs: &RuntimeInputs,
    clock: &dyn Clock,
) -> Result<QueryRequest, BuildError> {
    let scoring_parameters = match use_case.required_input() {
        None => Vec::new(),
        Some(input) => vec![scoring_parameter(input, inputs)?],
    };

    let facets = if use_case.has_facets() {
        vec![rating_facet(), date_facet(clock.now())]
    } else {
        Vec::new()
    };

    let request = QueryRequest {
        search_text: inputs.search_text.clone(),
        search_mode: use_case.search_mode(),
        select: use_case.select().iter().map(|s| s.to_string()).collect(),
        facets,
        top: use_case.is_ranked().then_some(RANKED_PAGE_SIZE),
        include_total_count: true,
        scoring_profile: use_case.scoring_profile().map(str::to_string),
        scoring_parameters,
    };
    validate_against_schema(&request)?;
    Ok(request)
}

fn scoring_parameter(input: RuntimeInput, inputs: &RuntimeInputs) -> Result<ScoringParameter, BuildError> {
    let name = input.parameter_name();
    let values = match input {
        RuntimeInput::Location => {
            let p = inputs.location.ok_or_else(|| BuildError::missing(name))?;
            vec![p.longitude.to_string(), p.latitude.to_string()]
        }
        RuntimeInput::FavoriteTag => {
            let tag = inputs
                .favorite_tag
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| BuildError::missing(name))?;
            vec![tag.to_string()]
        }
    };
    Ok(ScoringParameter::new(name, values))
}

fn validate_against_schema(request: &QueryRequest) -> Result<(), BuildError> {
    let schema = build_schema();
    for name in &request.select {
        match find_field(&schema, name) {
            Some(f) if f.retrievable => {}
            _ => {
                return Err(BuildError::invalid(
                    "select",
                    format!("`{}` is not a retrievable field", name),
                ))
            }
        }
    }
    for facet in &request.facets {
        match find_field(&schema, facet.field()) {
            Some(f) if f.facetable => {}
            _ => {
                return Err(BuildError::invalid(
                    "facets",
                    format!("`{}` is not a facetable field", facet.field()),
                ))
            }
        }
        if !facet.boundaries_valid() {
            return Err(BuildError::invalid(
                "facets",
                format!("`{}` needs ascending, non-empty bucket boundaries", facet.field()),
            ));
        }
    }
    Ok(())
}
