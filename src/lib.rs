// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request construction and response formatting for a hosted search index.
//!
//! The search service does all the hard work (tokenizing, ranking, faceting,
//! geo-distance). This crate builds what it sends and renders what comes back,
//! and drives the whole thing from an interactive console.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  schema.rs  │──▶│  scoring/    │──▶│   query/     │
//! │ (fields,    │   │ (profiles,   │   │ (use cases,  │
//! │  suggester) │   │  functions)  │   │  facets)     │
//! └─────────────┘   └──────────────┘   └──────────────┘
//!        │                                    │
//!        ▼                                    ▼
//! ┌──────────────────────────────┐   ┌──────────────┐
//! │ service/ (SearchService,     │──▶│  format.rs   │
//! │ RestSearchClient)            │   │ (result text)│
//! └──────────────────────────────┘   └──────────────┘
//!                 ▲
//!                 │
//! ┌──────────────────────────────┐
//! │ cli/ (menu loop, prompts,    │
//! │ colours) + session + sample  │
//! └──────────────────────────────┘
//! ```
//!
//! Builders are pure and fail with [`BuildError`] before anything touches the
//! network. The service boundary fails with [`ServiceError`].
//!
//! # Usage
//!
//! ```ignore
//! use eventsearch::{build_query, format_results, RuntimeInputs, SystemClock, UseCase};
//!
//! let inputs = RuntimeInputs::new("packers").with_favorite_tag("packers");
//! let request = build_query(UseCase::TagRanked, &inputs, &SystemClock)?;
//! let results = service.search("events", &request).await?;
//! println!("{}", format_results(&results));
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod query;
pub mod sample;
pub mod schema;
pub mod scoring;
pub mod service;
pub mod session;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ServiceConfig;
pub use error::{BuildError, Error, Result, ServiceError};
pub use format::{format_record, format_results};
pub use query::{build_query, QueryRequest, RuntimeInput, RuntimeInputs, SearchMode, UseCase};
pub use schema::{build_schema, index_definition};
pub use scoring::{build_profile, ProfileKind, ProfileParams, ScoringFunction, ScoringProfile};
pub use service::{RestSearchClient, SearchService};
pub use session::Session;
pub use types::{
    BatchOutcome, DataType, Field, GeoPoint, IndexAction, IndexBatch, IndexDefinition,
    IndexSummary, Record, ResultSet,
};
