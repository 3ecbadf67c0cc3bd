//! Tool dispatch within one exchange
//!
//! Invocations run strictly in emission order. Each one's state change and
//! acknowledgement round-trip finish before the next starts, since the
//! conversational session cannot take concurrent sends.

use super::executor::{ExchangeError, SessionRuntime};
use super::traits::{ConversationSession, ImageSynthesizer};
use super::{REQUIREMENTS_ACK, VISUALIZATION_ACK};
use crate::llm::{AspectRatio, SessionReply, ToolInvocation};
use crate::session::{Render, RequirementsDoc};
use crate::state_machine::Event;
use crate::tools::ToolInput;

/// Text that becomes the assistant turn when the exchange finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct CandidateReply {
    text: String,
}

impl CandidateReply {
    pub(super) fn new(primary: impl Into<String>) -> Self {
        Self {
            text: primary.into(),
        }
    }

    /// Replace the candidate outright, even with empty text
    pub(super) fn supersede(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The reply to record, if there is anything to say
    pub(super) fn into_final(self) -> Option<String> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(self.text)
        }
    }
}

impl<S, I> SessionRuntime<S, I>
where
    S: ConversationSession,
    I: ImageSynthesizer,
{
    pub(super) async fn dispatch(
        &mut self,
        invocations: Vec<ToolInvocation>,
        candidate: &mut CandidateReply,
    ) -> Result<(), ExchangeError> {
        for invocation in invocations {
            let input = ToolInput::from_invocation(invocation);
            let tool = input.tool_name().to_string();
            tracing::debug!(tool = %tool, "Dispatching tool invocation");

            match input {
                ToolInput::UpdateRequirements(partial) => {
                    self.update_requirements(&tool, partial).await?;
                }
                ToolInput::GenerateVisualization(input) => {
                    if let Some(text) = self
                        .generate_visualization(&tool, input.architectural_prompt)
                        .await?
                    {
                        candidate.supersede(text);
                    }
                }
                ToolInput::Unknown { name, .. } => {
                    tracing::debug!(tool = %name, "Ignoring unrecognized tool invocation");
                }
            }
        }
        Ok(())
    }

    /// Merge, then acknowledge. A failed acknowledgement fails the exchange
    /// but the merge stays applied.
    async fn update_requirements(
        &mut self,
        tool: &str,
        partial: RequirementsDoc,
    ) -> Result<(), ExchangeError> {
        tracing::info!(keys = partial.len(), "Updating requirements");
        self.apply(Event::RequirementsUpdated { partial })?;

        let ack = self.session.send_tool_result(tool, REQUIREMENTS_ACK).await?;
        log_nested_invocations(&ack, tool);
        Ok(())
    }

    /// Returns the acknowledgement reply text when a render was shown
    async fn generate_visualization(
        &mut self,
        tool: &str,
        prompt: String,
    ) -> Result<Option<String>, ExchangeError> {
        self.apply(Event::VisualizationStarted {
            prompt: prompt.clone(),
        })?;

        let image = match self
            .synthesizer
            .synthesize(&prompt, AspectRatio::Widescreen)
            .await
        {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "Visualization failed, keeping the primary reply");
                self.apply(Event::VisualizationFailed)?;
                return Ok(None);
            }
        };

        let render = Render::new(image, prompt);
        tracing::info!(render_id = %render.id, image = %render.image_ref, "Render added");
        self.apply(Event::VisualizationSucceeded { render })?;

        match self.session.send_tool_result(tool, VISUALIZATION_ACK).await {
            Ok(ack) => {
                log_nested_invocations(&ack, tool);
                Ok(Some(ack.text))
            }
            Err(e) => {
                // The render is already on screen; only the follow-up text is lost
                tracing::warn!(error = %e, "Visualization acknowledgement failed");
                Ok(None)
            }
        }
    }
}

fn log_nested_invocations(ack: &SessionReply, acknowledged: &str) {
    if ack.has_invocations() {
        let names: Vec<&str> = ack.invocations.iter().map(|i| i.name.as_str()).collect();
        tracing::warn!(
            acknowledged,
            ?names,
            "Tool invocations in an acknowledgement reply are not dispatched"
        );
    }
}
