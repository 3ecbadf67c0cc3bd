//! HTTP API over the single strategist session

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{ConversationSession, ImageSynthesizer, SessionHandle};
use std::sync::Arc;

/// Session handle with the collaborators erased
pub type SharedSession = SessionHandle<Box<dyn ConversationSession>, Arc<dyn ImageSynthesizer>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
}

impl AppState {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }
}
