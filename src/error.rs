// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two families that never mix. [`BuildError`] comes from constructing a
//! scoring profile or a query locally, before anything touches the network.
//! [`ServiceError`] comes back from the search service after a call was made.
//! The console prints both the same way, but a `BuildError` guarantees that no
//! partial request was sent.

use thiserror::Error;

/// Local validation failure while building a profile or a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Malformed scoring/profile/query input (non-positive boost, unknown field, ...).
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// A use case needs a runtime value the operator did not supply.
    #[error("missing runtime input `{parameter}`")]
    MissingRuntimeInput { parameter: String },
}

impl BuildError {
    pub(crate) fn invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(parameter: impl Into<String>) -> Self {
        BuildError::MissingRuntimeInput {
            parameter: parameter.into(),
        }
    }
}

/// Failure reported by (or while talking to) the search service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 404: index or document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// 409: index already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// 401/403: bad or missing api key.
    #[error("access denied: {0}")]
    Unauthorized(String),

    /// 400: the service rejected the schema, profile or query.
    #[error("rejected by service: {0}")]
    InvalidRequest(String),

    /// Connection, timeout or TLS failure.
    #[error("network error: {0}")]
    Network(String),

    /// 5xx or any other unexpected status.
    #[error("service error: {0}")]
    Server(String),

    /// Response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Top-level error for console operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
