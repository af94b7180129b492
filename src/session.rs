//! Tracking session
//!
//! A finite-state machine for one day's tracking. The caller feeds typed
//! requests (from prompts, tool calls, a script) and acts on the typed
//! responses; the session never reads input or prints anything itself.
//!
//! ```text
//! Collecting --Stop--> Summarizing --> Terminal
//! ```
//!
//! While collecting, a consumed name either resolves against the store or
//! becomes the pending unknown food, which must be registered or skipped
//! before anything else is consumed. The consumed list and the totals only
//! ever change together.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

use crate::error::{StoreError, ValidationError};
use crate::models::{normalize_name, FoodDraft, FoodRecord, Nutrition};
use crate::nutrition::{summarize_consumed, Aggregator};
use crate::report::{DayReport, Summary};
use crate::store::FoodStore;

/// Typed as a food name, ends collection
pub const STOP_SENTINEL: &str = "stop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Collecting,
    Summarizing,
    Terminal,
}

#[derive(Debug, Clone)]
pub enum SessionRequest {
    Consume(String),
    /// Register the pending unknown food; the draft's name is ignored
    Register(FoodDraft),
    Skip,
    Stop,
}

impl SessionRequest {
    /// A typed food name, with the stop sentinel honored
    pub fn from_name(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case(STOP_SENTINEL) {
            SessionRequest::Stop
        } else {
            SessionRequest::Consume(input.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionResponse {
    /// Found in the store and counted
    Added { name: String },
    /// Not in the store; register it or skip it
    UnknownFood { name: String },
    /// Saved to the store and counted
    Registered { name: String },
    /// Counted nowhere
    Skipped { name: String },
    Finished(Summary),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} is not in the database yet: register it or skip it first")]
    AwaitingDecision(String),

    #[error("No unknown food is waiting to be registered or skipped")]
    NothingPending,

    #[error("Tracking session is already finished")]
    Closed,
}

pub type SessionResult = Result<SessionResponse, SessionError>;

pub struct TrackingSession<S> {
    store: S,
    tolerance: f64,
    phase: SessionPhase,
    pending: Option<String>,
    aggregator: Aggregator,
    consumed: Vec<String>,
    // Stored records never change, so one lookup per name is enough
    cache: HashMap<String, FoodRecord>,
    started_at: DateTime<Local>,
}

impl<S: FoodStore> TrackingSession<S> {
    /// `tolerance` applies to calorie values supplied on registration
    pub fn new(store: S, tolerance: f64) -> Self {
        tracing::debug!("Tracking session started");
        Self {
            store,
            tolerance,
            phase: SessionPhase::Collecting,
            pending: None,
            aggregator: Aggregator::new(),
            consumed: Vec::new(),
            cache: HashMap::new(),
            started_at: Local::now(),
        }
    }

    pub fn handle(&mut self, request: SessionRequest) -> SessionResult {
        if self.phase != SessionPhase::Collecting {
            return Err(SessionError::Closed);
        }

        match request {
            SessionRequest::Consume(name) => self.consume(&name),
            SessionRequest::Register(draft) => self.register(draft),
            SessionRequest::Skip => self.skip(),
            SessionRequest::Stop => Ok(SessionResponse::Finished(self.stop())),
        }
    }

    fn consume(&mut self, raw: &str) -> SessionResult {
        if let Some(pending) = &self.pending {
            return Err(SessionError::AwaitingDecision(pending.clone()));
        }

        let name = normalize_name(raw);
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let record = match self.cache.get(&name) {
            Some(record) => record.clone(),
            None => match self.store.get(&name)? {
                Some(record) => {
                    self.cache.insert(name.clone(), record.clone());
                    record
                }
                None => {
                    tracing::debug!(food = %name, "Unknown food, awaiting registration");
                    self.pending = Some(name.clone());
                    return Ok(SessionResponse::UnknownFood { name });
                }
            },
        };

        self.count(&record);
        Ok(SessionResponse::Added { name })
    }

    fn register(&mut self, draft: FoodDraft) -> SessionResult {
        let name = self.pending.clone().ok_or(SessionError::NothingPending)?;

        // Invalid input leaves the food pending so the entry can be retried
        let record = FoodRecord::from_draft(&FoodDraft { name, ..draft }, self.tolerance)?;

        // A store failure resolves the pending food either way
        self.pending = None;
        self.store.put(&record)?;

        self.cache.insert(record.name().to_string(), record.clone());
        self.count(&record);
        Ok(SessionResponse::Registered {
            name: record.name().to_string(),
        })
    }

    fn skip(&mut self) -> SessionResult {
        let name = self.pending.take().ok_or(SessionError::NothingPending)?;
        tracing::debug!(food = %name, "Skipped unknown food");
        Ok(SessionResponse::Skipped { name })
    }

    fn stop(&mut self) -> Summary {
        if let Some(name) = self.pending.take() {
            tracing::debug!(food = %name, "Abandoned unknown food at stop");
        }

        self.phase = SessionPhase::Summarizing;
        let summary = match self.aggregator.finalize() {
            Ok(breakdown) => Summary::Report(DayReport {
                started_at: self.started_at,
                consumed: summarize_consumed(&self.consumed),
                breakdown,
            }),
            Err(_) => Summary::NoData,
        };
        self.phase = SessionPhase::Terminal;

        tracing::info!(foods = self.aggregator.len(), "Tracking session finished");
        summary
    }

    fn count(&mut self, record: &FoodRecord) {
        self.aggregator.accumulate(record);
        self.consumed.push(record.name().to_string());
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Unknown food awaiting register/skip
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn consumed(&self) -> &[String] {
        &self.consumed
    }

    pub fn totals(&self) -> &Nutrition {
        self.aggregator.totals()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
