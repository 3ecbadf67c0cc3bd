//! Pure state transition function
//!
//! Every change to a `SessionState` goes through `transition`, which keeps
//! the phase, the generation flag and the gallery consistent with each other.

use super::{Effect, Event, SessionPhase, SessionState};
use crate::session::Turn;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("An exchange is already in progress, wait for the reply")]
    ExchangeInFlight,
    #[error("No exchange is in progress")]
    NoExchangeInFlight,
    #[error("A visualization is already being generated")]
    AlreadyGenerating,
    #[error("No visualization is being generated")]
    NotGenerating,
}

/// Pure transition function
///
/// Given the same state and event it always produces the same result and
/// performs no I/O. Ids and timestamps arrive inside the event.
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Exchange lifecycle
        // ============================================================
        Event::UserMessage { turn } => {
            if state.exchange_in_flight {
                return Err(TransitionError::ExchangeInFlight);
            }
            let effects = [
                Effect::PublishState,
                Effect::notify_exchange_started(),
                Effect::notify_turn(&turn),
            ];
            let mut next = state.clone();
            next.transcript = next.transcript.append(turn);
            next.exchange_in_flight = true;
            Ok(TransitionResult::new(next).with_effects(effects))
        }

        Event::ExchangeCompleted { reply } => finish_exchange(state, reply),

        Event::ExchangeFailed { fallback } => finish_exchange(state, Some(fallback)),

        // ============================================================
        // Requirements
        // ============================================================
        Event::RequirementsUpdated { partial } => {
            let mut next = state.clone();
            next.requirements = state.requirements.merge(&partial);

            // Only the first non-empty merge leaves discovery
            if state.phase == SessionPhase::Discovery
                && state.requirements.is_empty()
                && !next.requirements.is_empty()
            {
                next.phase = SessionPhase::Briefing;
            }

            let mut effects = vec![
                Effect::PublishState,
                Effect::notify_requirements(&next.requirements),
            ];
            if next.phase != state.phase {
                effects.push(Effect::notify_phase_change(state.phase, next.phase));
            }
            Ok(TransitionResult::new(next).with_effects(effects))
        }

        // ============================================================
        // Visualization
        // ============================================================
        Event::VisualizationStarted { prompt } => {
            if state.generation_in_flight() {
                return Err(TransitionError::AlreadyGenerating);
            }
            let mut next = state.clone();
            next.resume_phase = Some(state.phase);
            next.phase = SessionPhase::Generating;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishState)
                .with_effect(Effect::notify_phase_change(
                    state.phase,
                    SessionPhase::Generating,
                ))
                .with_effect(Effect::notify_generation_started(&prompt)))
        }

        Event::VisualizationSucceeded { render } => {
            if !state.generation_in_flight() {
                return Err(TransitionError::NotGenerating);
            }
            let render_effect = Effect::notify_render(&render);
            let mut next = state.clone();
            next.gallery = next.gallery.prepend(render);
            next.phase = SessionPhase::Visualized;
            next.resume_phase = None;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishState)
                .with_effect(render_effect)
                .with_effect(Effect::notify_phase_change(
                    SessionPhase::Generating,
                    SessionPhase::Visualized,
                )))
        }

        Event::VisualizationFailed => {
            if !state.generation_in_flight() {
                return Err(TransitionError::NotGenerating);
            }
            let restored = state.resume_phase.unwrap_or_else(|| settled_phase(state));
            let mut next = state.clone();
            next.phase = restored;
            next.resume_phase = None;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishState)
                .with_effect(Effect::notify_phase_change(
                    SessionPhase::Generating,
                    restored,
                )))
        }
    }
}

fn finish_exchange(
    state: &SessionState,
    reply: Option<Turn>,
) -> Result<TransitionResult, TransitionError> {
    if !state.exchange_in_flight {
        return Err(TransitionError::NoExchangeInFlight);
    }
    let mut effects = vec![Effect::PublishState];
    let mut next = state.clone();
    if let Some(turn) = reply {
        effects.push(Effect::notify_turn(&turn));
        next.transcript = next.transcript.append(turn);
    }
    next.exchange_in_flight = false;
    effects.push(Effect::notify_exchange_done());
    Ok(TransitionResult::new(next).with_effects(effects))
}

/// Best non-generating phase derivable from the models alone
fn settled_phase(state: &SessionState) -> SessionPhase {
    if !state.gallery.is_empty() {
        SessionPhase::Visualized
    } else if state.requirements.is_empty() {
        SessionPhase::Discovery
    } else {
        SessionPhase::Briefing
    }
}
