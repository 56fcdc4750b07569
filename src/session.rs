// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-run session context.
//!
//! The only state that outlives a single operation is which index the
//! operator is working on. It lives here and is passed to every operation
//! explicitly.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    index_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_index(name: impl Into<String>) -> Self {
        let mut session = Session::new();
        session.select_index(name);
        session
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Select an index; blank names clear the selection.
    pub fn select_index(&mut self, name: impl Into<String>) {
        let name = name.into().trim().to_string();
        self.index_name = (!name.is_empty()).then_some(name);
    }

    pub fn clear(&mut self) {
        self.index_name = None;
    }
}
