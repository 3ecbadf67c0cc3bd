//! Effects produced by state transitions

use super::state::SessionPhase;
use crate::session::{Render, RequirementsDoc, Turn};
use serde_json::{json, Value};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Publish the new state snapshot to readers
    PublishState,

    /// Notify connected clients
    NotifyClient { event_type: String, data: Value },
}

impl Effect {
    fn notify(event_type: &str, data: Value) -> Self {
        Effect::NotifyClient {
            event_type: event_type.to_string(),
            data,
        }
    }

    pub fn notify_turn(turn: &Turn) -> Self {
        Self::notify("turn", serde_json::to_value(turn).unwrap_or(Value::Null))
    }

    pub fn notify_requirements(requirements: &RequirementsDoc) -> Self {
        Self::notify(
            "requirements",
            json!({
                "requirements": requirements,
                "brief": requirements.brief(),
            }),
        )
    }

    pub fn notify_phase_change(from: SessionPhase, to: SessionPhase) -> Self {
        Self::notify(
            "phase_change",
            json!({
                "from": from,
                "phase": to,
                "generation_in_flight": to == SessionPhase::Generating,
            }),
        )
    }

    pub fn notify_generation_started(prompt: &str) -> Self {
        Self::notify("generation_started", json!({ "prompt": prompt }))
    }

    pub fn notify_render(render: &Render) -> Self {
        Self::notify("render", serde_json::to_value(render).unwrap_or(Value::Null))
    }

    pub fn notify_exchange_started() -> Self {
        Self::notify("exchange_started", Value::Null)
    }

    pub fn notify_exchange_done() -> Self {
        Self::notify("exchange_done", Value::Null)
    }

    /// Phase reported by a `phase_change` notification, if this is one
    pub fn phase_change_target(&self) -> Option<SessionPhase> {
        match self {
            Effect::NotifyClient { event_type, data } if event_type == "phase_change" => {
                serde_json::from_value(data.get("phase")?.clone()).ok()
            }
            _ => None,
        }
    }
}
