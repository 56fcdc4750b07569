//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use eventsearch::cli::{display, App, Prompt};
use eventsearch::service::ServiceResult;
use eventsearch::types::{ActionKind, FailedAction, IndexSummary, ScoredRecord};
use eventsearch::{
    BatchOutcome, FixedClock, IndexBatch, IndexDefinition, QueryRequest, Record, ResultSet,
    ScoringProfile, SearchService, ServiceError, Session,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// FIXTURES
// ============================================================================

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}

pub fn record(key: &str, name: &str) -> Record {
    Record {
        key: Some(key.to_string()),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn hit(score: f64, record: Record) -> ScoredRecord {
    ScoredRecord { score, record }
}

// ============================================================================
// IN-MEMORY SERVICE
// ============================================================================

pub struct FakeIndex {
    pub definition: IndexDefinition,
    pub documents: BTreeMap<String, Record>,
}

#[derive(Default)]
pub struct FakeState {
    pub indexes: BTreeMap<String, FakeIndex>,
    /// Every search the service received, in order.
    pub searches: Vec<(String, QueryRequest)>,
    /// Returned by every search.
    pub canned_results: ResultSet,
    /// Documents with these keys are refused inside an accepted batch.
    pub reject_keys: HashSet<String>,
}

/// Behaves like the hosted service for everything the console relies on.
#[derive(Default)]
pub struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    pub fn new() -> Self {
        FakeService::default()
    }

    pub fn with_index(name: &str) -> Self {
        let service = FakeService::new();
        service.state().indexes.insert(
            name.to_string(),
            FakeIndex {
                definition: eventsearch::index_definition(name),
                documents: BTreeMap::new(),
            },
        );
        service
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn insert(&self, index: &str, record: Record) {
        let key = record.key.clone().unwrap();
        self.state()
            .indexes
            .get_mut(index)
            .unwrap()
            .documents
            .insert(key, record);
    }

    pub fn profile_names(&self, index: &str) -> Vec<String> {
        self.state().indexes[index]
            .definition
            .scoring_profiles
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }
}

fn missing_index(name: &str) -> ServiceError {
    ServiceError::NotFound(format!("No index with the name '{}' was found in the service.", name))
}

#[async_trait]
impl SearchService for FakeService {
    async fn list_indexes(&self) -> ServiceResult<Vec<IndexSummary>> {
        Ok(self
            .state()
            .indexes
            .iter()
            .map(|(name, idx)| IndexSummary {
                name: name.clone(),
                document_count: idx.documents.len() as u64,
            })
            .collect())
    }

    async fn create_index(&self, definition: &IndexDefinition) -> ServiceResult<()> {
        let mut state = self.state();
        if state.indexes.contains_key(&definition.name) {
            return Err(ServiceError::AlreadyExists(format!(
                "The index '{}' already exists.",
                definition.name
            )));
        }
        state.indexes.insert(
            definition.name.clone(),
            FakeIndex {
                definition: definition.clone(),
                documents: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn submit_documents(&self, index: &str, batch: &IndexBatch) -> ServiceResult<BatchOutcome> {
        let mut state = self.state();
        let rejected = state.reject_keys.clone();
        let idx = state.indexes.get_mut(index).ok_or_else(|| missing_index(index))?;

        let mut outcome = BatchOutcome::default();
        for action in &batch.actions {
            let key = action.record.key.clone().unwrap_or_default();
            if rejected.contains(&key) {
                outcome.failed.push(FailedAction {
                    key,
                    message: "Document is not valid.".to_string(),
                });
                continue;
            }
            match action.action {
                ActionKind::Upload => {
                    idx.documents.insert(key, action.record.clone());
                }
                ActionKind::Merge => {
                    if let Some(existing) = idx.documents.get_mut(&key) {
                        if action.record.name.is_some() {
                            existing.name = action.record.name.clone();
                        }
                        if action.record.rating.is_some() {
                            existing.rating = action.record.rating;
                        }
                    }
                }
                ActionKind::Delete => {
                    idx.documents.remove(&key);
                }
            }
            outcome.succeeded += 1;
        }
        Ok(outcome)
    }

    async fn document_count(&self, index: &str) -> ServiceResult<u64> {
        let state = self.state();
        let idx = state.indexes.get(index).ok_or_else(|| missing_index(index))?;
        Ok(idx.documents.len() as u64)
    }

    async fn delete_index(&self, index: &str) -> ServiceResult<()> {
        self.state()
            .indexes
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| missing_index(index))
    }

    async fn get_document(&self, index: &str, key: &str) -> ServiceResult<Record> {
        let state = self.state();
        let idx = state.indexes.get(index).ok_or_else(|| missing_index(index))?;
        idx.documents
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Document '{}' not found.", key)))
    }

    async fn update_scoring_profiles(&self, index: &str, profiles: &[ScoringProfile]) -> ServiceResult<()> {
        let mut state = self.state();
        let idx = state.indexes.get_mut(index).ok_or_else(|| missing_index(index))?;
        let existing = &mut idx.definition.scoring_profiles;
        for profile in profiles {
            match existing.iter_mut().find(|p| p.name == profile.name) {
                Some(slot) => *slot = profile.clone(),
                None => existing.push(profile.clone()),
            }
        }
        Ok(())
    }

    async fn search(&self, index: &str, request: &QueryRequest) -> ServiceResult<ResultSet> {
        let mut state = self.state();
        let idx = state.indexes.get(index).ok_or_else(|| missing_index(index))?;
        if let Some(profile) = &request.scoring_profile {
            if !idx.definition.scoring_profiles.iter().any(|p| &p.name == profile) {
                return Err(ServiceError::InvalidRequest(format!(
                    "Unknown scoring profile '{}'.",
                    profile
                )));
            }
        }
        state.searches.push((index.to_string(), request.clone()));
        Ok(state.canned_results.clone())
    }
}

// ============================================================================
// CONSOLE DRIVER
// ============================================================================

pub fn app(service: FakeService) -> App<FakeService> {
    App::new(service, 5)
        .with_clock(Box::new(clock()))
        .with_rng(StdRng::seed_from_u64(7))
}

pub fn app_on(service: FakeService, index: &str) -> App<FakeService> {
    app(service).with_session(Session::with_index(index))
}

/// Feed `script` to the menu loop and return everything it printed.
pub async fn run_script(app: &mut App<FakeService>, script: &str) -> String {
    run_raw_script(app, script.as_bytes()).await
}

/// Like [`run_script`], for input that is not valid UTF-8.
pub async fn run_raw_script(app: &mut App<FakeService>, script: &[u8]) -> String {
    display::disable_colors();
    let mut prompt = Prompt::new(script, Vec::new());
    app.run(&mut prompt).await.unwrap();
    String::from_utf8(prompt.into_output()).unwrap()
}
