// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The interactive menu loop.
//!
//! Each pass prints the index state banner, the menu, reads one choice and
//! runs it. Errors from an operation (local build errors and service errors
//! alike) are printed in red and the loop continues. Only `0`, end of input,
//! or a failure to write to the console ends the session.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::display;
use super::menu::MenuItem;
use super::prompt::Prompt;
use crate::clock::{Clock, SystemClock};
use crate::error::{BuildError, Error, Result};
use crate::format::{format_record, format_results};
use crate::query::{build_query, RuntimeInput, RuntimeInputs, UseCase};
use crate::sample::generate_batch;
use crate::schema::index_definition;
use crate::scoring::{build_profile, ProfileKind, ProfileParams};
use crate::service::SearchService;
use crate::session::Session;
use crate::types::{GeoPoint, IndexSummary};

pub struct App<S> {
    service: S,
    session: Session,
    clock: Box<dyn Clock>,
    rng: StdRng,
    documents: usize,
}

impl<S: SearchService> App<S> {
    pub fn new(service: S, documents: usize) -> Self {
        App {
            service,
            session: Session::new(),
            clock: Box::new(SystemClock),
            rng: StdRng::from_entropy(),
            documents,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn run<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<()> {
        loop {
            let has_indexes = self.print_index_state(prompt).await?;
            prompt.blank()?;
            self.print_menu(prompt, has_indexes)?;
            prompt.blank()?;

            let question = format!("Enter an option [0-{}] and press ENTER: ", MenuItem::HIGHEST);
            let Some(item) = prompt
                .read_integer(&question, 0..=MenuItem::HIGHEST)?
                .and_then(MenuItem::from_number)
            else {
                return Ok(());
            };
            if item == MenuItem::Exit {
                return Ok(());
            }

            debug!(item = item.number(), "menu selection");
            match self.execute(item, prompt).await {
                Ok(()) => {}
                // Console gone, nothing left to report to.
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => prompt.say(&display::failure(&e.to_string()))?,
            }
            prompt.blank()?;
        }
    }

    /// Prints every index with its document count. Returns whether any exist.
    async fn print_index_state<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> Result<bool> {
        prompt.say(&display::notice("Current indexes state:"))?;
        match self.service.list_indexes().await {
            Ok(indexes) if indexes.is_empty() => {
                prompt.say(&display::notice("\tService doesn't contain any indexes."))?;
                Ok(false)
            }
            Ok(indexes) => {
                for IndexSummary {
                    name,
                    document_count,
                } in &indexes
                {
                    prompt.say(&display::notice(&format!("\t{} ({})", name, document_count)))?;
                }
                Ok(true)
            }
            Err(e) => {
                prompt.say(&display::failure(&e.to_string()))?;
                Ok(false)
            }
        }
    }

    fn print_menu<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>, has_indexes: bool) -> Result<()> {
        for item in MenuItem::ALL {
            let enabled = has_indexes || !item.needs_existing_index();
            let line = format!("{}. {}", item.number(), item.label());
            prompt.say(&display::menu_item(&line, enabled))?;
        }
        Ok(())
    }

    /// Run one menu item.
    pub async fn execute<R: BufRead, W: Write>(&mut self, item: MenuItem, prompt: &mut Prompt<R, W>) -> Result<()> {
        match item {
            MenuItem::Exit => Ok(()),
            MenuItem::CreateIndex => self.create_index(prompt).await,
            MenuItem::AddDocuments => self.add_documents(prompt).await,
            MenuItem::CountIndex => self.count_index(prompt).await,
            MenuItem::Query(use_case) => self.query(use_case, prompt).await,
            MenuItem::UpdateProfile(kind) => self.update_profile(kind, prompt).await,
            MenuItem::DocumentLookup => self.document_lookup(prompt).await,
            MenuItem::DeleteIndex => self.delete_index(prompt).await,
        }
    }

    /// The selected index, asking for one if the session has none yet.
    fn index_name<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<String> {
        if let Some(name) = self.session.index_name() {
            return Ok(name.to_string());
        }
        let answer = prompt.ask("What's the index's name: ")?;
        self.session.select_index(answer);
        self.session
            .index_name()
            .map(str::to_string)
            .ok_or_else(|| BuildError::missing("index name").into())
    }

    async fn create_index<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<()> {
        let answer = prompt.ask("What's the index's name: ")?;
        self.session.select_index(answer);
        let name = self
            .session
            .index_name()
            .map(str::to_string)
            .ok_or_else(|| BuildError::invalid("index name", "must not be empty"))?;

        self.service.create_index(&index_definition(&name)).await?;
        prompt.say(&display::success(&format!("Index {} added successfully.", name)))
    }

    async fn add_documents<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<()> {
        let index = self.index_name(prompt)?;
        let batch = generate_batch(&mut self.rng, self.documents, self.clock.now());
        let outcome = self.service.submit_documents(&index, &batch).await?;

        if outcome.is_complete() {
            return prompt.say(&display::success(&format!(
                "{} documents added successfully.",
                outcome.succeeded
            )));
        }
        prompt.say(&display::notice(&format!(
            "{} documents added, {} failed:",
            outcome.succeeded,
            outcome.failed.len()
        )))?;
        for failed in &outcome.failed {
            prompt.say(&display::failure(&format!("\t{}: {}", failed.key, failed.message)))?;
        }
        Ok(())
    }

    async fn count_index<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<()> {
        let index = self.index_name(prompt)?;
        let count = self.service.document_count(&index).await?;
        prompt.say(&display::success(&format!(
            "Index {} contains {} documents.",
            index, count
        )))
    }

    async fn query<R: BufRead, W: Write>(&mut self, use_case: UseCase, prompt: &mut Prompt<R, W>) -> Result<()> {
        let index = self.index_name(prompt)?;
        let mut inputs = RuntimeInputs::new(prompt.ask("What are you searching for? (blank for everything)")?);

        match use_case.required_input() {
            Some(input @ RuntimeInput::Location) => {
                let answer = prompt.ask(input.prompt())?;
                if !answer.is_empty() {
                    inputs.location = Some(answer.parse::<GeoPoint>()?);
                }
            }
            Some(input @ RuntimeInput::FavoriteTag) => {
                inputs.favorite_tag = Some(prompt.ask(input.prompt())?);
            }
            None => {}
        }

        // Nothing is sent unless the request builds.
        let request = build_query(use_case, &inputs, self.clock.as_ref())?;
        let results = self.service.search(&index, &request).await?;
        prompt.say(&format_results(&results))
    }

    async fn update_profile<R: BufRead, W: Write>(&mut self, kind: ProfileKind, prompt: &mut Prompt<R, W>) -> Result<()> {
        let index = self.index_name(prompt)?;
        let profile = build_profile(kind, &ProfileParams::for_kind(kind))?;
        self.service
            .update_scoring_profiles(&index, std::slice::from_ref(&profile))
            .await?;
        prompt.say(&display::success(&format!(
            "Scoring profile '{}' added to index {}.",
            profile.name, index
        )))
    }

    async fn document_lookup<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<()> {
        let index = self.index_name(prompt)?;
        let key = prompt.ask("Which document key?")?;
        if key.is_empty() {
            return Err(BuildError::missing("key").into());
        }
        let record = self.service.get_document(&index, &key).await?;
        prompt.say(&format_record(&record))
    }

    async fn delete_index<R: BufRead, W: Write>(&mut self, prompt: &mut Prompt<R, W>) -> Result<()> {
        let index = self.index_name(prompt)?;
        self.service.delete_index(&index).await?;
        self.session.clear();
        prompt.say(&display::success(&format!("Index {} deleted.", index)))
    }
}
