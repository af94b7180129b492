//! Tracking MCP Tools
//!
//! Drive one tracking session across tool calls. The server owns the slot;
//! these functions only move the session through its states.

use serde::Serialize;

use crate::models::{FoodDraft, Nutrition};
use crate::report::Summary;
use crate::session::{SessionPhase, SessionRequest, SessionResponse, TrackingSession};
use crate::store::FoodStore;

/// The server's single active session, if any
pub type SessionSlot<S> = Option<TrackingSession<S>>;

#[derive(Debug, Serialize)]
pub struct StartTrackingResponse {
    pub success: bool,
    pub message: String,
    pub consumed_count: usize,
}

/// Result of one consume/register/skip step
#[derive(Debug, Serialize)]
pub struct TrackingStepResponse {
    /// "added", "unknown_food", "registered" or "skipped"
    pub outcome: &'static str,
    pub food: String,
    pub message: String,
    pub pending: Option<String>,
    pub consumed_count: usize,
    pub totals: Nutrition,
}

#[derive(Debug, Serialize)]
pub struct FinishTrackingResponse {
    pub summary: Summary,
    /// Output-sink text for the summary
    pub report: String,
}

/// Open a session, or report the one already running
pub fn start_tracking<S: FoodStore>(
    slot: &mut SessionSlot<S>,
    store: S,
    tolerance: f64,
) -> StartTrackingResponse {
    if let Some(session) = slot.as_ref() {
        if session.phase() == SessionPhase::Collecting {
            return StartTrackingResponse {
                success: true,
                message: "Tracking session was already active".to_string(),
                consumed_count: session.consumed().len(),
            };
        }
    }

    *slot = Some(TrackingSession::new(store, tolerance));
    StartTrackingResponse {
        success: true,
        message: "Tracking session started. Log foods with consume_food; call finish_tracking for the report."
            .to_string(),
        consumed_count: 0,
    }
}

fn active<S: FoodStore>(slot: &mut SessionSlot<S>) -> Result<&mut TrackingSession<S>, String> {
    slot.as_mut()
        .ok_or_else(|| "No tracking session is active; call start_tracking first".to_string())
}

fn step<S: FoodStore>(
    slot: &mut SessionSlot<S>,
    request: SessionRequest,
) -> Result<TrackingStepResponse, String> {
    let session = active(slot)?;
    let response = session.handle(request).map_err(|e| e.to_string())?;

    let (outcome, food, message) = match response {
        SessionResponse::Added { name } => ("added", name.clone(), format!("Added {}", name)),
        SessionResponse::UnknownFood { name } => (
            "unknown_food",
            name.clone(),
            format!(
                "{} is not in the database. Call register_food with its macros, or skip_food.",
                name
            ),
        ),
        SessionResponse::Registered { name } => (
            "registered",
            name.clone(),
            format!("Successfully saved {} to the database and added it", name),
        ),
        SessionResponse::Skipped { name } => ("skipped", name.clone(), format!("Skipped {}", name)),
        SessionResponse::Finished(_) => {
            return Err("Use finish_tracking to end the session".to_string());
        }
    };

    Ok(TrackingStepResponse {
        outcome,
        food,
        message,
        pending: session.pending().map(str::to_string),
        consumed_count: session.consumed().len(),
        totals: *session.totals(),
    })
}

pub fn consume_food<S: FoodStore>(
    slot: &mut SessionSlot<S>,
    name: &str,
) -> Result<TrackingStepResponse, String> {
    step(slot, SessionRequest::Consume(name.to_string()))
}

pub fn register_food<S: FoodStore>(
    slot: &mut SessionSlot<S>,
    draft: FoodDraft,
) -> Result<TrackingStepResponse, String> {
    step(slot, SessionRequest::Register(draft))
}

pub fn skip_food<S: FoodStore>(slot: &mut SessionSlot<S>) -> Result<TrackingStepResponse, String> {
    step(slot, SessionRequest::Skip)
}

/// Stop the session and take its summary; the slot is emptied
pub fn finish_tracking<S: FoodStore>(slot: &mut SessionSlot<S>) -> Result<FinishTrackingResponse, String> {
    let mut session = slot
        .take()
        .ok_or_else(|| "No tracking session is active; call start_tracking first".to_string())?;

    match session.handle(SessionRequest::Stop).map_err(|e| e.to_string())? {
        SessionResponse::Finished(summary) => {
            let report = summary.render();
            Ok(FinishTrackingResponse { summary, report })
        }
        other => Err(format!("Unexpected session response: {:?}", other)),
    }
}
