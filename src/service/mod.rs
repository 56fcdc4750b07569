// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The boundary to the hosted search service.
//!
//! Everything the console does remotely goes through [`SearchService`]. The
//! REST client is the production implementation; tests drive the console
//! against an in-memory fake instead.
//!
//! Calls are awaited one at a time. There is no local retry policy and no
//! rollback: a failed batch leaves whatever the service already committed.

mod rest;

pub use rest::{merge_scoring_profiles, RestSearchClient};

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::query::QueryRequest;
use crate::scoring::ScoringProfile;
use crate::types::{BatchOutcome, IndexBatch, IndexDefinition, IndexSummary, Record, ResultSet};

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait SearchService: Send + Sync {
    /// Every index on the service with its document count.
    async fn list_indexes(&self) -> ServiceResult<Vec<IndexSummary>>;

    /// Fails with `AlreadyExists` if an index of that name is present.
    async fn create_index(&self, definition: &IndexDefinition) -> ServiceResult<()>;

    /// Per-document failures are reported in the outcome, not as an error.
    async fn submit_documents(&self, index: &str, batch: &IndexBatch) -> ServiceResult<BatchOutcome>;

    async fn document_count(&self, index: &str) -> ServiceResult<u64>;

    async fn delete_index(&self, index: &str) -> ServiceResult<()>;

    async fn get_document(&self, index: &str, key: &str) -> ServiceResult<Record>;

    /// Insert or replace the given profiles by name; other profiles are kept.
    async fn update_scoring_profiles(&self, index: &str, profiles: &[ScoringProfile]) -> ServiceResult<()>;

    async fn search(&self, index: &str, request: &QueryRequest) -> ServiceResult<ResultSet>;
}
