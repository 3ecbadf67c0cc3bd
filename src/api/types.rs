//! API request and response types

use crate::session::{BriefEntry, Render, RequirementsDoc, Turn};
use crate::state_machine::{SessionPhase, SessionState};
use serde::{Deserialize, Serialize};

/// Request to send a user message
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Response for an accepted message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub accepted: bool,
}

/// Everything a client needs to draw the session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Turn>,
    pub requirements: RequirementsDoc,
    pub brief: Vec<BriefEntry>,
    pub active_render: Option<Render>,
    pub history: Vec<Render>,
    pub phase: SessionPhase,
    pub generation_in_flight: bool,
    pub exchange_in_flight: bool,
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            transcript: state.transcript.turns().to_vec(),
            requirements: state.requirements.clone(),
            brief: state.requirements.brief(),
            active_render: state.gallery.active().cloned(),
            history: state.gallery.history().to_vec(),
            phase: state.phase,
            generation_in_flight: state.generation_in_flight(),
            exchange_in_flight: state.exchange_in_flight,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
