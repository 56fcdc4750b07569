// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! REST implementation of [`SearchService`].
//!
//! | Operation               | Request                                             |
//! |-------------------------|-----------------------------------------------------|
//! | list indexes            | `GET /indexes?$select=name`, then stats per index   |
//! | create index            | `POST /indexes`                                     |
//! | submit documents        | `POST /indexes/{n}/docs/index` (one per chunk)      |
//! | document count          | `GET /indexes/{n}/stats`                            |
//! | delete index            | `DELETE /indexes/{n}`                               |
//! | get document            | `GET /indexes/{n}/docs/{key}`                       |
//! | update scoring profiles | `GET /indexes/{n}`, merge, `PUT /indexes/{n}`       |
//! | search                  | `POST /indexes/{n}/docs/search`                     |
//!
//! Every request carries the `api-key` header and the `api-version` query
//! parameter.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{SearchService, ServiceResult};
use crate::config::ServiceConfig;
use crate::error::{Error, ServiceError};
use crate::query::QueryRequest;
use crate::scoring::ScoringProfile;
use crate::types::{
    BatchOutcome, FailedAction, IndexBatch, IndexDefinition, IndexSummary, Record, ResultSet,
};

#[derive(Clone)]
pub struct RestSearchClient {
    client: Client,
    base: Url,
    api_key: String,
    api_version: String,
    batch_size: usize,
}

impl fmt::Debug for RestSearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestSearchClient")
            .field("base", &self.base.as_str())
            .field("api_version", &self.api_version)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

#[derive(Deserialize)]
struct IndexList {
    #[serde(default)]
    value: Vec<IndexName>,
}

#[derive(Deserialize)]
struct IndexName {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexStats {
    document_count: u64,
}

#[derive(Deserialize)]
struct IndexingResults {
    #[serde(default)]
    value: Vec<IndexingResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexingResult {
    key: String,
    status: bool,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    status_code: Option<u16>,
}

impl RestSearchClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, Error> {
        let base = Url::parse(&config.endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint `{}`: {e}", config.endpoint)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid endpoint `{}`", config.endpoint)));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(RestSearchClient {
            client,
            base,
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            batch_size: config.batch_size.max(1),
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, path = url.path(), "search service request");
        self.client
            .request(method, url)
            .header("api-key", &self.api_key)
    }

    async fn send(req: RequestBuilder, what: &str) -> ServiceResult<Response> {
        let resp = req.send().await.map_err(Self::map_network_error)?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(Self::map_error(resp, what).await)
        }
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> ServiceResult<T> {
        resp.json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    /// Map a non-2xx response to a `ServiceError`.
    ///
    /// Prefers the service's `error.message`, then the raw body, then `what`.
    async fn map_error(resp: Response, what: &str) -> ServiceError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = service_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("{what} (status {status})")
            } else {
                body.trim().to_string()
            }
        });

        match status {
            StatusCode::NOT_FOUND => ServiceError::NotFound(message),
            StatusCode::CONFLICT => ServiceError::AlreadyExists(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Unauthorized(message),
            StatusCode::BAD_REQUEST => ServiceError::InvalidRequest(message),
            s if s.is_server_error() => ServiceError::Server(message),
            _ => ServiceError::Server(format!("unexpected status {status}: {message}")),
        }
    }

    /// Map a reqwest error (network/timeout) to a `ServiceError`.
    fn map_network_error(e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            ServiceError::Network(format!("connection failed: {e}"))
        } else {
            ServiceError::Network(e.to_string())
        }
    }

    async fn submit_chunk(&self, index: &str, chunk: &IndexBatch) -> ServiceResult<BatchOutcome> {
        let url = self.url(&["indexes", index, "docs", "index"]);
        let resp = Self::send(
            self.request(Method::POST, url).json(chunk),
            &format!("indexing into '{index}'"),
        )
        .await?;
        let results: IndexingResults = Self::decode(resp).await?;

        let mut outcome = BatchOutcome::default();
        for r in results.value {
            if r.status {
                outcome.succeeded += 1;
            } else {
                let message = r.error_message.unwrap_or_else(|| match r.status_code {
                    Some(code) => format!("status {code}"),
                    None => "rejected".to_string(),
                });
                outcome.failed.push(FailedAction {
                    key: r.key,
                    message,
                });
            }
        }
        Ok(outcome)
    }
}

fn service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Upsert `profiles` by name into the `scoringProfiles` array of a raw
/// index definition. Profiles with other names are left untouched.
pub fn merge_scoring_profiles(
    definition: &mut Value,
    profiles: &[ScoringProfile],
) -> ServiceResult<()> {
    let object = definition
        .as_object_mut()
        .ok_or_else(|| ServiceError::InvalidResponse("index definition is not an object".to_string()))?;
    object.remove("@odata.context");
    object.remove("@odata.etag");

    let existing = object
        .entry("scoringProfiles")
        .or_insert_with(|| Value::Array(Vec::new()));
    if existing.is_null() {
        *existing = Value::Array(Vec::new());
    }
    let existing = existing
        .as_array_mut()
        .ok_or_else(|| ServiceError::InvalidResponse("`scoringProfiles` is not an array".to_string()))?;

    for profile in profiles {
        let value = serde_json::to_value(profile)
            .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;
        match existing
            .iter_mut()
            .find(|p| p.get("name").and_then(Value::as_str) == Some(profile.name.as_str()))
        {
            Some(slot) => *slot = value,
            None => existing.push(value),
        }
    }
    Ok(())
}

#[async_trait]
impl SearchService for RestSearchClient {
    async fn list_indexes(&self) -> ServiceResult<Vec<IndexSummary>> {
        let mut url = self.url(&["indexes"]);
        url.query_pairs_mut().append_pair("$select", "name");
        let resp = Self::send(self.request(Method::GET, url), "index list").await?;
        let list: IndexList = Self::decode(resp).await?;

        let mut summaries = Vec::with_capacity(list.value.len());
        for IndexName { name } in list.value {
            let document_count = self.document_count(&name).await?;
            summaries.push(IndexSummary {
                name,
                document_count,
            });
        }
        Ok(summaries)
    }

    async fn create_index(&self, definition: &IndexDefinition) -> ServiceResult<()> {
        let url = self.url(&["indexes"]);
        Self::send(
            self.request(Method::POST, url).json(definition),
            &format!("index '{}'", definition.name),
        )
        .await?;
        info!(index = %definition.name, fields = definition.fields.len(), "index created");
        Ok(())
    }

    async fn submit_documents(&self, index: &str, batch: &IndexBatch) -> ServiceResult<BatchOutcome> {
        let mut outcome = BatchOutcome::default();
        // Earlier chunks stay committed if a later one fails.
        for chunk in batch.chunks(self.batch_size) {
            outcome.absorb(self.submit_chunk(index, &chunk).await?);
        }

        if outcome.is_complete() {
            info!(index, documents = outcome.succeeded, "documents indexed");
        } else {
            warn!(
                index,
                succeeded = outcome.succeeded,
                failed = outcome.failed.len(),
                "batch partially failed"
            );
        }
        Ok(outcome)
    }

    async fn document_count(&self, index: &str) -> ServiceResult<u64> {
        let url = self.url(&["indexes", index, "stats"]);
        let resp = Self::send(self.request(Method::GET, url), &format!("index '{index}'")).await?;
        let stats: IndexStats = Self::decode(resp).await?;
        Ok(stats.document_count)
    }

    async fn delete_index(&self, index: &str) -> ServiceResult<()> {
        let url = self.url(&["indexes", index]);
        Self::send(self.request(Method::DELETE, url), &format!("index '{index}'")).await?;
        info!(index, "index deleted");
        Ok(())
    }

    async fn get_document(&self, index: &str, key: &str) -> ServiceResult<Record> {
        let url = self.url(&["indexes", index, "docs", key]);
        let resp = Self::send(
            self.request(Method::GET, url),
            &format!("document '{key}' in index '{index}'"),
        )
        .await?;
        Self::decode(resp).await
    }

    async fn update_scoring_profiles(&self, index: &str, profiles: &[ScoringProfile]) -> ServiceResult<()> {
        let what = format!("index '{index}'");
        let url = self.url(&["indexes", index]);
        let resp = Self::send(self.request(Method::GET, url.clone()), &what).await?;
        let mut definition: Value = Self::decode(resp).await?;

        merge_scoring_profiles(&mut definition, profiles)?;

        Self::send(self.request(Method::PUT, url).json(&definition), &what).await?;
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        info!(index, profiles = ?names, "scoring profiles updated");
        Ok(())
    }

    async fn search(&self, index: &str, request: &QueryRequest) -> ServiceResult<ResultSet> {
        let url = self.url(&["indexes", index, "docs", "search"]);
        let resp = Self::send(
            self.request(Method::POST, url).json(&request.to_body()),
            &format!("index '{index}'"),
        )
        .await?;
        Self::decode(resp).await
    }
}
