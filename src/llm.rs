//! Conversational and image model collaborators
//!
//! Both are backed by Gemini in production and by mocks in tests.

mod config;
mod error;
mod gemini;
mod imagen;
mod types;

pub use config::LlmConfig;
pub use error::{LlmError, SynthesisError};
pub use types::*;

use crate::runtime::ConversationSession;
use async_trait::async_trait;
use std::time::Instant;

/// Logging wrapper for conversational sessions
pub struct LoggingSession<S> {
    inner: S,
    label: String,
}

impl<S: ConversationSession> LoggingSession<S> {
    pub fn new(inner: S, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }
}

impl<S> LoggingSession<S> {
    fn log_outcome(
        &self,
        result: &Result<SessionReply, LlmError>,
        started: Instant,
        tool: Option<&str>,
    ) {
        let duration = started.elapsed();
        match result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.label,
                    tool,
                    duration_ms = %duration.as_millis(),
                    reply_chars = reply.text.chars().count(),
                    invocations = reply.invocations.len(),
                    "Conversation turn completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.label,
                    tool,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    transient = e.kind.is_transient(),
                    "Conversation turn failed"
                );
            }
        }
    }
}

#[async_trait]
impl<S: ConversationSession> ConversationSession for LoggingSession<S> {
    async fn send_turn(&mut self, text: &str) -> Result<SessionReply, LlmError> {
        let started = Instant::now();
        let result = self.inner.send_turn(text).await;
        self.log_outcome(&result, started, None);
        result
    }

    async fn send_tool_result(
        &mut self,
        tool: &str,
        result: &str,
    ) -> Result<SessionReply, LlmError> {
        let started = Instant::now();
        let reply = self.inner.send_tool_result(tool, result).await;
        self.log_outcome(&reply, started, Some(tool));
        reply
    }
}
