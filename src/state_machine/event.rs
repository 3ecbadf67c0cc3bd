//! Events that drive the session state

use crate::session::{Render, RequirementsDoc, Turn};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Exchange lifecycle
    UserMessage {
        turn: Turn,
    },
    ExchangeCompleted {
        /// Final assistant turn, absent when the model produced no text
        reply: Option<Turn>,
    },
    ExchangeFailed {
        fallback: Turn,
    },

    // Tool effects
    RequirementsUpdated {
        partial: RequirementsDoc,
    },
    VisualizationStarted {
        prompt: String,
    },
    VisualizationSucceeded {
        render: Render,
    },
    /// Synthesis failed; the error itself is logged by the runtime
    VisualizationFailed,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::UserMessage { .. } => "user_message",
            Event::ExchangeCompleted { .. } => "exchange_completed",
            Event::ExchangeFailed { .. } => "exchange_failed",
            Event::RequirementsUpdated { .. } => "requirements_updated",
            Event::VisualizationStarted { .. } => "visualization_started",
            Event::VisualizationSucceeded { .. } => "visualization_succeeded",
            Event::VisualizationFailed => "visualization_failed",
        }
    }
}
