//! Session runtime executor

use super::traits::{ConversationSession, ImageSynthesizer};
use super::{SessionEvent, FALLBACK_REPLY};
use crate::llm::LlmError;
use crate::session::Turn;
use crate::state_machine::{transition, Effect, Event, SessionState, TransitionError};
use thiserror::Error;
use tokio::sync::{broadcast, watch};

/// Reasons an exchange ends with the fallback turn
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Conversation transport failed: {0}")]
    Transport(#[from] LlmError),
    #[error("Invalid transition: {0}")]
    Transition(#[from] TransitionError),
}

/// Sole owner of the session state
pub struct SessionRuntime<S, I> {
    state: SessionState,
    pub(super) session: S,
    pub(super) synthesizer: I,
    state_tx: watch::Sender<SessionState>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
}

impl<S, I> SessionRuntime<S, I> {
    pub fn new(session: S, synthesizer: I) -> Self {
        Self::with_state(SessionState::new(), session, synthesizer)
    }

    pub fn with_state(state: SessionState, session: S, synthesizer: I) -> Self {
        let (state_tx, _) = watch::channel(state.clone());
        let (broadcast_tx, _) = broadcast::channel(128);
        Self {
            state,
            session,
            synthesizer,
            state_tx,
            broadcast_tx,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn broadcast_sender(&self) -> broadcast::Sender<SessionEvent> {
        self.broadcast_tx.clone()
    }

    /// Run the pure transition, commit the result and execute its effects
    pub(super) fn apply(&mut self, event: Event) -> Result<(), TransitionError> {
        let event_name = event.name();
        let result = transition(&self.state, event).inspect_err(|e| {
            tracing::warn!(event = event_name, error = %e, "Transition rejected");
        })?;

        self.state = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect);
        }
        Ok(())
    }

    fn execute_effect(&self, effect: Effect) {
        if let Some(phase) = effect.phase_change_target() {
            tracing::info!(phase = %phase, "Phase changed");
        }
        match effect {
            Effect::PublishState => {
                self.state_tx.send_replace(self.state.clone());
            }
            Effect::NotifyClient { event_type, data } => {
                // No subscribers is fine
                let _ = self.broadcast_tx.send(SessionEvent { event_type, data });
            }
        }
    }

    /// Record the user turn and mark the exchange in flight
    pub(super) fn start_exchange(&mut self, text: &str) -> Result<(), TransitionError> {
        self.apply(Event::UserMessage {
            turn: Turn::user(text),
        })?;
        tracing::info!(chars = text.chars().count(), "Exchange started");
        Ok(())
    }

    /// Settle a started exchange that will never run to completion
    pub(super) fn abandon_exchange(&mut self) {
        if self.state.generation_in_flight() {
            if let Err(e) = self.apply(Event::VisualizationFailed) {
                tracing::error!(error = %e, "Could not settle an abandoned visualization");
            }
        }
        if self.state.exchange_in_flight {
            tracing::warn!("Exchange abandoned before it finished");
            if let Err(e) = self.apply(Event::ExchangeCompleted { reply: None }) {
                tracing::error!(error = %e, "Could not settle an abandoned exchange");
            }
        }
    }
}

impl<S, I> SessionRuntime<S, I>
where
    S: ConversationSession,
    I: ImageSynthesizer,
{
    /// Drive one full exchange for a user message
    ///
    /// Fails only when another exchange is already running. Every other
    /// failure degrades to the fallback turn, and the in-flight flag is
    /// cleared on every path.
    #[cfg(test)]
    pub async fn submit_user_message(&mut self, text: &str) -> Result<(), TransitionError> {
        self.start_exchange(text)?;
        self.finish_exchange(text).await
    }

    /// Run a started exchange and settle it
    pub(super) async fn finish_exchange(&mut self, text: &str) -> Result<(), TransitionError> {
        let finish = match self.run_exchange(text).await {
            Ok(reply) => {
                tracing::info!(
                    replied = reply.is_some(),
                    phase = %self.state.phase,
                    turns = self.state.transcript.len(),
                    renders = self.state.gallery.len(),
                    "Exchange completed"
                );
                Event::ExchangeCompleted {
                    reply: reply.map(Turn::assistant),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Exchange failed, replying with fallback");
                Event::ExchangeFailed {
                    fallback: Turn::assistant(FALLBACK_REPLY),
                }
            }
        };
        self.apply(finish)
    }

    /// Send the user text, dispatch any tool calls and settle the final reply
    async fn run_exchange(&mut self, text: &str) -> Result<Option<String>, ExchangeError> {
        let reply = self.session.send_turn(text).await?;
        let mut candidate = super::dispatcher::CandidateReply::new(reply.text);
        self.dispatch(reply.invocations, &mut candidate).await?;
        Ok(candidate.into_final())
    }
}
