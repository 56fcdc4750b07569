// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Service connection settings, resolved and validated once at startup.

use std::fmt;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_API_VERSION: &str = "2020-06-30";

/// The service refuses indexing requests with more actions than this.
pub const MAX_BATCH_SIZE: usize = 1000;

#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service root, without trailing slash.
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub timeout: Duration,
    pub batch_size: usize,
    /// Mock events generated per "Add documents".
    pub documents: usize,
}

// Keep the key out of logs.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("batch_size", &self.batch_size)
            .field("documents", &self.documents)
            .finish()
    }
}

impl ServiceConfig {
    /// Config for an explicit endpoint with every other setting at its default.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        ServiceConfig {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            batch_size: MAX_BATCH_SIZE,
            documents: 1000,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("an api key is required (--api-key or SEARCH_SERVICE_API_KEY)".to_string()))?;

        let endpoint = match (cli.endpoint.as_deref(), cli.service_name.as_deref()) {
            (Some(endpoint), _) if !endpoint.trim().is_empty() => endpoint.trim().to_string(),
            (_, Some(name)) if !name.trim().is_empty() => service_endpoint(name.trim()),
            _ => {
                return Err(Error::Config(
                    "either --service-name or --endpoint is required".to_string(),
                ))
            }
        };

        let config = ServiceConfig {
            api_version: cli.api_version.trim().to_string(),
            timeout: Duration::from_secs(cli.timeout_secs),
            batch_size: cli.batch_size,
            documents: cli.documents,
            ..ServiceConfig::new(endpoint, api_key)
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("api key must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(Error::Config(format!(
                "endpoint `{}` must start with http:// or https://",
                self.endpoint
            )));
        }
        if self.api_version.is_empty() {
            return Err(Error::Config("api version must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be > 0".to_string()));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(Error::Config(format!(
                "batch size must be in 1..={}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            )));
        }
        Ok(())
    }
}

/// `https://{name}.search.windows.net`
pub fn service_endpoint(service_name: &str) -> String {
    format!("https://{}.search.windows.net", service_name)
}
