// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The numbered menu.

use crate::query::UseCase;
use crate::scoring::ProfileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    Exit,
    CreateIndex,
    AddDocuments,
    CountIndex,
    Query(UseCase),
    UpdateProfile(ProfileKind),
    DocumentLookup,
    DeleteIndex,
}

impl MenuItem {
    /// Menu order, numbered from 1. `Exit` is printed last as `0`.
    pub const ALL: [MenuItem; 15] = [
        MenuItem::CreateIndex,
        MenuItem::AddDocuments,
        MenuItem::CountIndex,
        MenuItem::Query(UseCase::SimpleAll),
        MenuItem::Query(UseCase::SimpleAny),
        MenuItem::Query(UseCase::Faceted),
        MenuItem::UpdateProfile(ProfileKind::Freshness),
        MenuItem::Query(UseCase::FreshnessRanked),
        MenuItem::UpdateProfile(ProfileKind::Geo),
        MenuItem::Query(UseCase::GeoRanked),
        MenuItem::UpdateProfile(ProfileKind::FreshnessAndTag),
        MenuItem::Query(UseCase::TagRanked),
        MenuItem::DocumentLookup,
        MenuItem::DeleteIndex,
        MenuItem::Exit,
    ];

    pub const HIGHEST: u32 = 14;

    pub fn from_number(n: u32) -> Option<MenuItem> {
        match n {
            0 => Some(MenuItem::Exit),
            1..=14 => Some(MenuItem::ALL[n as usize - 1]),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            MenuItem::Exit => 0,
            item => MenuItem::ALL
                .iter()
                .position(|&i| i == item)
                .map_or(0, |p| p as u32 + 1),
        }
    }

    pub fn label(self) -> String {
        match self {
            MenuItem::Exit => "Exit".to_string(),
            MenuItem::CreateIndex => "Create index".to_string(),
            MenuItem::AddDocuments => "Add documents".to_string(),
            MenuItem::CountIndex => "Count index".to_string(),
            MenuItem::Query(use_case) => format!("Query index - {}", use_case.label()),
            MenuItem::UpdateProfile(ProfileKind::Freshness) => "Index update".to_string(),
            MenuItem::UpdateProfile(ProfileKind::Geo) => {
                "Index update (geo-location scoring profile)".to_string()
            }
            MenuItem::UpdateProfile(ProfileKind::FreshnessAndTag) => {
                "Index update (freshness + tag scoring profile)".to_string()
            }
            MenuItem::DocumentLookup => "Document lookup".to_string(),
            MenuItem::DeleteIndex => "Delete index".to_string(),
        }
    }

    /// Only index creation and exit make sense on a service without indexes.
    pub fn needs_existing_index(self) -> bool {
        !matches!(self, MenuItem::Exit | MenuItem::CreateIndex)
    }
}
