// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring profiles: named ranking formulas the service applies at query time.
//!
//! A profile is a list of boost functions whose contributions are summed.
//! We never compute a score ourselves. This module only builds and validates
//! the definitions the service evaluates.

mod core;
pub mod ranking;

pub use self::core::*;
pub use ranking::{build_profile, ProfileKind, ProfileParams};
