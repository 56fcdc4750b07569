// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Console front end for the eventsearch walkthrough.
//!
//! There are no subcommands. The binary connects to one search service and
//! runs an interactive numbered menu until the operator picks `0`. Every flag
//! that identifies the service can also come from the environment, so the api
//! key never has to appear on the command line.

pub mod app;
pub mod display;
pub mod menu;
pub mod prompt;

use clap::Parser;

pub use app::App;
pub use menu::MenuItem;
pub use prompt::Prompt;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "eventsearch",
    about = "Interactive walkthrough of a hosted search index: schema, documents, scoring profiles and queries",
    version
)]
pub struct Cli {
    // === Service ===
    /// Search service name (the `<name>` in https://<name>.search.windows.net)
    #[arg(long, env = "SEARCH_SERVICE_NAME")]
    pub service_name: Option<String>,

    /// Admin api key for the search service
    #[arg(long, env = "SEARCH_SERVICE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Full service endpoint; overrides --service-name
    #[arg(long, env = "SEARCH_SERVICE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// REST api version sent with every request
    #[arg(long, env = "SEARCH_API_VERSION", default_value = crate::config::DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    // === Documents ===
    /// Maximum documents per indexing request (service limit is 1000)
    #[arg(long, default_value = "1000")]
    pub batch_size: usize,

    /// Number of mock events generated by "Add documents"
    #[arg(long, default_value = "1000")]
    pub documents: usize,

    // === Output ===
    /// Log service calls to stderr (honours RUST_LOG)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable coloured output (NO_COLOR is honoured too)
    #[arg(long)]
    pub no_color: bool,
}
