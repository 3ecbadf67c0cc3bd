//! Session state types

use crate::session::{Gallery, RequirementsDoc, Transcript};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opening line of every session
pub const GREETING: &str = "Welcome to your architectural journey. I am your strategist. \
Together we will uncover not just a floor plan, but the backdrop for the life you have always \
envisioned. Tell me, what does \"coming home\" mean to you?";

/// Coarse stage of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing concrete learned yet
    #[default]
    Discovery,
    /// At least one requirement is known
    Briefing,
    /// Image synthesis in flight
    Generating,
    /// A render is on screen
    Visualized,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Discovery => "discovery",
            SessionPhase::Briefing => "briefing",
            SessionPhase::Generating => "generating",
            SessionPhase::Visualized => "visualized",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root for a strategist session
///
/// Only the transition function produces new values of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub transcript: Transcript,
    pub requirements: RequirementsDoc,
    pub gallery: Gallery,
    pub phase: SessionPhase,
    /// Phase to restore if the in-flight synthesis fails
    pub(crate) resume_phase: Option<SessionPhase>,
    /// A user exchange is being processed
    pub exchange_in_flight: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::seeded(greeting),
            requirements: RequirementsDoc::new(),
            gallery: Gallery::default(),
            phase: SessionPhase::Discovery,
            resume_phase: None,
            exchange_in_flight: false,
        }
    }

    /// Derived from the phase so the two can never disagree
    pub fn generation_in_flight(&self) -> bool {
        self.phase == SessionPhase::Generating
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
