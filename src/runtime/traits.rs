//! Trait abstractions for the external collaborators
//!
//! These traits enable testing the runtime with mock implementations.

use crate::llm::{AspectRatio, LlmError, SessionReply, SynthesisError, ToolDefinition};
use crate::session::ImageRef;
use async_trait::async_trait;
use std::sync::Arc;

/// Factory for stateful conversational sessions
#[async_trait]
pub trait ConversationService: Send + Sync {
    type Session: ConversationSession + 'static;

    /// Establish a session that retains its own history across turns
    async fn create_session(
        &self,
        system_prompt: &str,
        tools: &[ToolDefinition],
    ) -> Result<Self::Session, LlmError>;
}

/// A live conversational session
///
/// Sends take `&mut self`: the remote history is single-threaded, so a
/// second send on the same session cannot start before the first returns.
#[async_trait]
pub trait ConversationSession: Send {
    /// Send the next user message and wait for the model's reply
    async fn send_turn(&mut self, text: &str) -> Result<SessionReply, LlmError>;

    /// Report the outcome of the model's call to `tool` and wait for the
    /// follow-up reply
    ///
    /// Sessions without structured tool results send `result` as a turn.
    async fn send_tool_result(
        &mut self,
        tool: &str,
        result: &str,
    ) -> Result<SessionReply, LlmError> {
        let _ = tool;
        self.send_turn(result).await
    }
}

/// Image synthesis backend
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Render `prompt`; a reply without image data is an error, never an
    /// empty success
    async fn synthesize(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageRef, SynthesisError>;
}

// ============================================================================
// Pointer implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ConversationSession + ?Sized> ConversationSession for Box<T> {
    async fn send_turn(&mut self, text: &str) -> Result<SessionReply, LlmError> {
        (**self).send_turn(text).await
    }

    async fn send_tool_result(
        &mut self,
        tool: &str,
        result: &str,
    ) -> Result<SessionReply, LlmError> {
        (**self).send_tool_result(tool, result).await
    }
}

#[async_trait]
impl<T: ImageSynthesizer + ?Sized> ImageSynthesizer for Arc<T> {
    async fn synthesize(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageRef, SynthesisError> {
        (**self).synthesize(prompt, aspect_ratio).await
    }
}
