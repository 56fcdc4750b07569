// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Profile builder: the three ranking profiles the walkthrough installs.
//!
//! | Kind              | Profile      | Functions                                                |
//! |-------------------|--------------|----------------------------------------------------------|
//! | `Freshness`       | `default`    | freshness(dateadded, 200, PT5M, logarithmic)             |
//! | `FreshnessAndTag` | `default`    | freshness as above + tag(tags, 500, tagsParameter, linear) |
//! | `Geo`             | `defaultgeo` | distance(geolocation, 10000, mylocation, 150 km, constant) |
//!
//! Validation happens here, before any request is built: a profile the
//! service would reject (or accept and then fail every query against) never
//! leaves the process.

use std::time::Duration;

use crate::error::BuildError;
use crate::schema::{self, build_schema, find_field};
use crate::types::DataType;

use super::core::{
    Aggregation, DistanceParams, FreshnessParams, Interpolation, ScoringFunction, ScoringProfile,
    TagParams,
};

/// Profile used by the freshness and freshness+tag use cases.
pub const DEFAULT_PROFILE: &str = "default";
/// Profile used by the geo use case.
pub const GEO_PROFILE: &str = "defaultgeo";
/// Query parameter carrying the caller's favourite tag.
pub const TAGS_PARAMETER: &str = "tagsParameter";
/// Query parameter carrying the caller's coordinate.
pub const LOCATION_PARAMETER: &str = "mylocation";

pub const DEFAULT_FRESHNESS_BOOST: f64 = 200.0;
pub const DEFAULT_TAG_BOOST: f64 = 500.0;
pub const DEFAULT_DISTANCE_BOOST: f64 = 10_000.0;
pub const DEFAULT_HALF_LIFE: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Freshness,
    FreshnessAndTag,
    Geo,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [
        ProfileKind::Freshness,
        ProfileKind::FreshnessAndTag,
        ProfileKind::Geo,
    ];

    pub fn profile_name(self) -> &'static str {
        match self {
            ProfileKind::Freshness | ProfileKind::FreshnessAndTag => DEFAULT_PROFILE,
            ProfileKind::Geo => GEO_PROFILE,
        }
    }
}

/// Tunables for [`build_profile`]. Start from [`ProfileParams::for_kind`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileParams {
    /// Boost of the kind's primary function (freshness, or distance for `Geo`).
    pub boost: f64,
    /// Boost of the tag function (`FreshnessAndTag` only).
    pub tag_boost: f64,
    pub half_life: Duration,
    pub max_distance_km: f64,
    pub freshness_field: String,
    pub tag_field: String,
    pub geo_field: String,
    pub tag_parameter: String,
    pub location_parameter: String,
}

impl ProfileParams {
    pub fn for_kind(kind: ProfileKind) -> Self {
        let boost = match kind {
            ProfileKind::Freshness | ProfileKind::FreshnessAndTag => DEFAULT_FRESHNESS_BOOST,
            ProfileKind::Geo => DEFAULT_DISTANCE_BOOST,
        };
        ProfileParams {
            boost,
            tag_boost: DEFAULT_TAG_BOOST,
            half_life: DEFAULT_HALF_LIFE,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            freshness_field: schema::DATE_ADDED.to_string(),
            tag_field: schema::TAGS.to_string(),
            geo_field: schema::GEOLOCATION.to_string(),
            tag_parameter: TAGS_PARAMETER.to_string(),
            location_parameter: LOCATION_PARAMETER.to_string(),
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    pub fn with_tag_boost(mut self, boost: f64) -> Self {
        self.tag_boost = boost;
        self
    }

    pub fn with_half_life(mut self, half_life: Duration) -> Self {
        self.half_life = half_life;
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }
}

/// Build a validated scoring profile. Aggregation is always `Sum`.
pub fn build_profile(kind: ProfileKind, params: &ProfileParams) -> Result<ScoringProfile, BuildError> {
    let functions = match kind {
        ProfileKind::Freshness => vec![freshness(params, params.boost)?],
        ProfileKind::FreshnessAndTag => vec![freshness(params, params.boost)?, tag(params)?],
        ProfileKind::Geo => vec![distance(params)?],
    };
    Ok(ScoringProfile {
        name: kind.profile_name().to_string(),
        function_aggregation: Aggregation::Sum,
        functions,
    })
}

fn freshness(params: &ProfileParams, boost: f64) -> Result<ScoringFunction, BuildError> {
    check_boost("boost", boost)?;
    check_field(&params.freshness_field, &[DataType::DateTimeOffset])?;
    // The wire format carries whole seconds only
    if params.half_life.as_secs() == 0 || params.half_life.subsec_nanos() != 0 {
        return Err(BuildError::invalid(
            "half_life",
            format!("must be a whole number of seconds, at least 1, got {:?}", params.half_life),
        ));
    }
    Ok(ScoringFunction::Freshness {
        field_name: params.freshness_field.clone(),
        boost,
        interpolation: Interpolation::Logarithmic,
        freshness: FreshnessParams {
            boosting_duration: params.half_life,
        },
    })
}

fn tag(params: &ProfileParams) -> Result<ScoringFunction, BuildError> {
    check_boost("tag_boost", params.tag_boost)?;
    check_field(
        &params.tag_field,
        &[DataType::StringCollection, DataType::String],
    )?;
    check_parameter_name("tag_parameter", &params.tag_parameter)?;
    Ok(ScoringFunction::Tag {
        field_name: params.tag_field.clone(),
        boost: params.tag_boost,
        interpolation: Interpolation::Linear,
        tag: TagParams {
            tags_parameter: params.tag_parameter.clone(),
        },
    })
}

fn distance(params: &ProfileParams) -> Result<ScoringFunction, BuildError> {
    check_boost("boost", params.boost)?;
    check_field(&params.geo_field, &[DataType::GeographyPoint])?;
    check_parameter_name("location_parameter", &params.location_parameter)?;
    if !(params.max_distance_km.is_finite() && params.max_distance_km > 0.0) {
        return Err(BuildError::invalid(
            "max_distance_km",
            format!("must be greater than zero, got {}", params.max_distance_km),
        ));
    }
    Ok(ScoringFunction::Distance {
        field_name: params.geo_field.clone(),
        boost: params.boost,
        interpolation: Interpolation::Constant,
        distance: DistanceParams {
            reference_point_parameter: params.location_parameter.clone(),
            boosting_distance: params.max_distance_km,
        },
    })
}

fn check_boost(parameter: &str, boost: f64) -> Result<(), BuildError> {
    // NaN fails the comparison too
    if boost.is_finite() && boost > 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid(
            parameter,
            format!("must be greater than zero, got {}", boost),
        ))
    }
}

fn check_field(name: &str, allowed: &[DataType]) -> Result<(), BuildError> {
    let field = find_field(&build_schema(), name)
        .ok_or_else(|| BuildError::invalid("field", format!("`{}` is not in the schema", name)))?;
    if allowed.contains(&field.data_type) {
        Ok(())
    } else {
        Err(BuildError::invalid(
            "field",
            format!("`{}` has type {:?}, expected one of {:?}", name, field.data_type, allowed),
        ))
    }
}

fn check_parameter_name(parameter: &str, value: &str) -> Result<(), BuildError> {
    if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
        Err(BuildError::invalid(parameter, "must be a non-empty name without spaces"))
    } else {
        Ok(())
    }
}
