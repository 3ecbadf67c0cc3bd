//! Runtime for the strategist session
//!
//! Owns the single `SessionState`, drives exchanges with the conversational
//! session and publishes every change to readers.

mod dispatcher;
mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;
pub use traits::*;

use crate::state_machine::SessionState;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, watch, Mutex, OwnedMutexGuard};

/// Sent back after a requirements update so the model's turn can complete
pub const REQUIREMENTS_ACK: &str = "Requirements updated successfully.";

/// Sent back after a render has been shown to the user
pub const VISUALIZATION_ACK: &str =
    "The visualization has been successfully generated and shown to the user.";

/// Assistant turn used when the conversational session cannot be reached
pub const FALLBACK_REPLY: &str = "I apologize, but my architectural systems encountered a brief \
     interruption. Shall we continue our discussion about your vision?";

/// Events sent to subscribed clients
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub event_type: String,
    pub data: Value,
}

/// Why a submission was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Message text must not be empty")]
    EmptyMessage,
    #[error("An exchange is already in progress, wait for the reply")]
    ExchangeInFlight,
}

/// Shared handle to the session runtime
///
/// Reads never wait on a running exchange: they are served from the latest
/// published snapshot.
pub struct SessionHandle<S, I> {
    runtime: Arc<Mutex<SessionRuntime<S, I>>>,
    state_rx: watch::Receiver<SessionState>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
}

impl<S, I> Clone for SessionHandle<S, I> {
    fn clone(&self) -> Self {
        Self {
            runtime: Arc::clone(&self.runtime),
            state_rx: self.state_rx.clone(),
            broadcast_tx: self.broadcast_tx.clone(),
        }
    }
}

impl<S, I> SessionHandle<S, I>
where
    S: ConversationSession + 'static,
    I: ImageSynthesizer + 'static,
{
    pub fn new(runtime: SessionRuntime<S, I>) -> Self {
        let state_rx = runtime.subscribe_state();
        let broadcast_tx = runtime.broadcast_sender();
        Self {
            runtime: Arc::new(Mutex::new(runtime)),
            state_rx,
            broadcast_tx,
        }
    }

    /// Latest published session state
    pub fn snapshot(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Claim the session for one exchange and record the user turn, or
    /// reject immediately
    ///
    /// Submissions are never queued: while another exchange holds the
    /// runtime this fails with `ExchangeInFlight`. On success the user turn
    /// is already published when this returns.
    pub fn begin(&self, text: &str) -> Result<PendingExchange<S, I>, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyMessage);
        }
        let mut guard = Arc::clone(&self.runtime)
            .try_lock_owned()
            .map_err(|_| SubmitError::ExchangeInFlight)?;
        guard
            .start_exchange(text)
            .map_err(|_| SubmitError::ExchangeInFlight)?;
        Ok(PendingExchange {
            guard,
            text: text.to_string(),
            finished: false,
        })
    }

    /// Run one full exchange to completion
    #[cfg(test)]
    pub async fn submit(&self, text: &str) -> Result<(), SubmitError> {
        self.begin(text)?.run().await;
        Ok(())
    }
}

/// A started exchange holding exclusive access to the runtime
///
/// Dropping it before `run` completes settles the exchange without a reply,
/// so the session never stays busy.
pub struct PendingExchange<S, I> {
    guard: OwnedMutexGuard<SessionRuntime<S, I>>,
    text: String,
    finished: bool,
}

impl<S, I> PendingExchange<S, I>
where
    S: ConversationSession + 'static,
    I: ImageSynthesizer + 'static,
{
    pub async fn run(mut self) {
        if let Err(e) = self.guard.finish_exchange(&self.text).await {
            tracing::error!(error = %e, "Exchange could not be settled");
        }
        self.finished = true;
    }
}

impl<S, I> Drop for PendingExchange<S, I> {
    fn drop(&mut self) {
        if !self.finished {
            self.guard.abandon_exchange();
        }
    }
}
