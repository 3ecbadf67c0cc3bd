//! Mock implementations for testing
//!
//! These mocks enable end-to-end exchange tests without real I/O.

use super::traits::*;
use crate::llm::{AspectRatio, LlmError, SessionReply, SynthesisError, ToolDefinition};
use crate::session::ImageRef;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock Conversation Session
// ============================================================================

/// Conversation session that replies from a queue
///
/// Clones share the queue and the record, so a test can keep one clone
/// while the runtime owns another.
#[derive(Clone, Default)]
pub struct MockConversationSession {
    replies: Arc<Mutex<VecDeque<Result<SessionReply, LlmError>>>>,
    sent: Arc<Mutex<Vec<String>>>,
    acknowledged: Arc<Mutex<Vec<String>>>,
    /// When set, each send waits for a notification before replying
    gate: Option<Arc<Notify>>,
}

impl MockConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: SessionReply) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    /// Queue a plain text reply
    pub fn queue_text(&self, text: &str) -> &Self {
        self.queue_reply(SessionReply::from_text(text))
    }

    /// Queue a transport failure
    pub fn queue_error(&self, error: LlmError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Texts sent so far, in order
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Tools whose results were sent, in order
    pub fn acknowledged(&self) -> Vec<String> {
        self.acknowledged.lock().unwrap().clone()
    }

    async fn next_reply(&self, text: &str) -> Result<SessionReply, LlmError> {
        self.sent.lock().unwrap().push(text.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock reply queued")))
    }
}

#[async_trait]
impl ConversationSession for MockConversationSession {
    async fn send_turn(&mut self, text: &str) -> Result<SessionReply, LlmError> {
        self.next_reply(text).await
    }

    async fn send_tool_result(
        &mut self,
        tool: &str,
        result: &str,
    ) -> Result<SessionReply, LlmError> {
        self.acknowledged.lock().unwrap().push(tool.to_string());
        self.next_reply(result).await
    }
}

// ============================================================================
// Mock Conversation Service
// ============================================================================

/// Hands out clones of one mock session and records how it was created
#[derive(Default)]
pub struct MockConversationService {
    pub session: MockConversationSession,
    pub created: Mutex<Vec<(String, Vec<ToolDefinition>)>>,
}

#[async_trait]
impl ConversationService for MockConversationService {
    type Session = MockConversationSession;

    async fn create_session(
        &self,
        system_prompt: &str,
        tools: &[ToolDefinition],
    ) -> Result<MockConversationSession, LlmError> {
        self.created
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), tools.to_vec()));
        Ok(self.session.clone())
    }
}

// ============================================================================
// Mock Image Synthesizer
// ============================================================================

/// Image synthesizer with queued results and recorded prompts
#[derive(Clone, Default)]
pub struct MockImageSynthesizer {
    results: Arc<Mutex<VecDeque<Result<ImageRef, SynthesisError>>>>,
    prompts: Arc<Mutex<Vec<(String, AspectRatio)>>>,
}

impl MockImageSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_image(&self, locator: &str) -> &Self {
        self.results
            .lock()
            .unwrap()
            .push_back(Ok(ImageRef::new(locator)));
        self
    }

    pub fn queue_error(&self, error: SynthesisError) -> &Self {
        self.results.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    pub fn aspect_ratios(&self) -> Vec<AspectRatio> {
        self.prompts.lock().unwrap().iter().map(|(_, a)| *a).collect()
    }
}

#[async_trait]
impl ImageSynthesizer for MockImageSynthesizer {
    async fn synthesize(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageRef, SynthesisError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), aspect_ratio));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SynthesisError::NoImageProduced))
    }
}

// ============================================================================
// Exchange Scenarios
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LoggingSession, ToolInvocation};
    use crate::runtime::{
        SessionEvent, SessionHandle, SessionRuntime, SubmitError, FALLBACK_REPLY,
        REQUIREMENTS_ACK, VISUALIZATION_ACK,
    };
    use crate::session::{RequirementKey, RequirementsDoc, Speaker};
    use crate::state_machine::{transition, Event, SessionPhase, SessionState};
    use serde_json::json;
    use tokio::sync::broadcast;

    const VILLA: &str = "modern villa, glass, infinity pool";

    type TestRuntime = SessionRuntime<MockConversationSession, MockImageSynthesizer>;

    fn runtime() -> (TestRuntime, MockConversationSession, MockImageSynthesizer) {
        runtime_with(SessionState::new())
    }

    fn runtime_with(
        state: SessionState,
    ) -> (TestRuntime, MockConversationSession, MockImageSynthesizer) {
        let session = MockConversationSession::new();
        let synth = MockImageSynthesizer::new();
        let rt = SessionRuntime::with_state(state, session.clone(), synth.clone());
        (rt, session, synth)
    }

    fn briefing_state() -> SessionState {
        transition(
            &SessionState::new(),
            Event::RequirementsUpdated {
                partial: RequirementsDoc::new().with(RequirementKey::Style, "modern"),
            },
        )
        .unwrap()
        .new_state
    }

    fn update_call(args: serde_json::Value) -> ToolInvocation {
        ToolInvocation::new("update_requirements", args)
    }

    fn visualize_call(prompt: &str) -> ToolInvocation {
        ToolInvocation::new(
            "generate_visualization",
            json!({ "architectural_prompt": prompt }),
        )
    }

    /// Phases reported by `phase_change` events, in order
    fn observed_phases(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionPhase> {
        let mut phases = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if event.event_type == "phase_change" {
                phases.push(serde_json::from_value(event.data["phase"].clone()).unwrap());
            }
        }
        phases
    }

    fn image_refs(state: &SessionState) -> Vec<&str> {
        state
            .gallery
            .renders()
            .iter()
            .map(|r| r.image_ref.as_str())
            .collect()
    }

    fn last_assistant(state: &SessionState) -> Option<&str> {
        state.transcript.latest_assistant().map(|t| t.text.as_str())
    }

    #[tokio::test]
    async fn test_plain_reply_appends_two_turns() {
        let (mut rt, session, _) = runtime();
        session.queue_text("Tell me about the light you love.");

        rt.submit_user_message("A house by the sea").await.unwrap();

        let turns = rt.state().transcript.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].speaker, Speaker::User);
        assert_eq!(turns[1].text, "A house by the sea");
        assert_eq!(turns[2].speaker, Speaker::Assistant);
        assert_eq!(turns[2].text, "Tell me about the light you love.");
        assert!(!rt.state().exchange_in_flight);
        assert_eq!(session.sent(), vec!["A house by the sea"]);
    }

    #[tokio::test]
    async fn test_transcript_grows_by_two_per_exchange() {
        let (mut rt, session, _) = runtime();
        let initial = rt.state().transcript.len();

        for i in 0..3 {
            session.queue_text(&format!("reply {i}"));
            rt.submit_user_message(&format!("message {i}")).await.unwrap();
        }

        assert_eq!(rt.state().transcript.len(), initial + 6);
    }

    #[tokio::test]
    async fn test_first_requirements_move_to_briefing() {
        let (mut rt, session, _) = runtime();
        session
            .queue_reply(
                SessionReply::from_text("Raw concrete, a bold choice.")
                    .with_invocation(update_call(json!({ "style": "brutalist" }))),
            )
            .queue_text("Noted.");

        rt.submit_user_message("I love exposed concrete").await.unwrap();

        let state = rt.state();
        assert_eq!(state.phase, SessionPhase::Briefing);
        assert_eq!(state.requirements.text(RequirementKey::Style), Some("brutalist"));
        assert_eq!(state.requirements.len(), 1);
        // The acknowledgement reply never reaches the transcript
        assert_eq!(last_assistant(state), Some("Raw concrete, a bold choice."));
        assert_eq!(state.transcript.len(), 3);
        assert_eq!(session.sent(), vec!["I love exposed concrete", REQUIREMENTS_ACK]);
        assert_eq!(session.acknowledged(), vec!["update_requirements"]);
    }

    #[tokio::test]
    async fn test_multiple_updates_apply_in_order() {
        let (mut rt, session, _) = runtime();
        session
            .queue_reply(
                SessionReply::from_text("Understood.")
                    .with_invocation(update_call(json!({ "style": "classic", "floors": "2" })))
                    .with_invocation(update_call(json!({ "style": "minimalist" }))),
            )
            .queue_text("ok")
            .queue_text("ok");

        rt.submit_user_message("Actually, simpler").await.unwrap();

        let reqs = &rt.state().requirements;
        assert_eq!(reqs.text(RequirementKey::Style), Some("minimalist"));
        assert_eq!(reqs.text(RequirementKey::Floors), Some("2"));
        assert_eq!(
            session.sent(),
            vec!["Actually, simpler", REQUIREMENTS_ACK, REQUIREMENTS_ACK]
        );
    }

    #[tokio::test]
    async fn test_malformed_requirements_accepted_as_is() {
        let (mut rt, session, _) = runtime();
        session
            .queue_reply(
                SessionReply::from_text("Got it.")
                    .with_invocation(update_call(json!({ "zones": "garden", "pets": 2 }))),
            )
            .queue_text("ok");

        rt.submit_user_message("A garden").await.unwrap();

        let reqs = &rt.state().requirements;
        assert_eq!(reqs.raw("zones"), Some(&json!("garden")));
        assert_eq!(reqs.list(RequirementKey::Zones), None);
        assert_eq!(reqs.raw("pets"), Some(&json!(2)));
        assert_eq!(rt.state().phase, SessionPhase::Briefing);
    }

    #[tokio::test]
    async fn test_successful_visualization() {
        let (mut rt, session, synth) = runtime_with(briefing_state());
        let mut events = rt.broadcast_sender().subscribe();
        session
            .queue_reply(SessionReply::from_text("Let me sketch that.").with_invocation(visualize_call(VILLA)))
            .queue_text("Here it is. Does the glass feel right?");
        synth.queue_image("R1");

        rt.submit_user_message("Show me").await.unwrap();

        let state = rt.state();
        assert_eq!(
            observed_phases(&mut events),
            vec![SessionPhase::Generating, SessionPhase::Visualized]
        );
        assert_eq!(image_refs(state), vec!["R1"]);
        assert_eq!(state.gallery.active().unwrap().source_prompt, VILLA);
        assert_eq!(state.phase, SessionPhase::Visualized);
        assert!(!state.generation_in_flight());
        // The acknowledgement text supersedes the primary text
        assert_eq!(last_assistant(state), Some("Here it is. Does the glass feel right?"));
        assert_eq!(session.sent(), vec!["Show me", VISUALIZATION_ACK]);
        assert_eq!(session.acknowledged(), vec!["generate_visualization"]);
        assert_eq!(synth.prompts(), vec![VILLA]);
        assert_eq!(synth.aspect_ratios(), vec![AspectRatio::Widescreen]);
    }

    #[tokio::test]
    async fn test_failed_visualization_restores_phase() {
        let (mut rt, session, synth) = runtime_with(briefing_state());
        let mut events = rt.broadcast_sender().subscribe();
        session.queue_reply(
            SessionReply::from_text("Let me sketch that.").with_invocation(visualize_call(VILLA)),
        );
        synth.queue_error(SynthesisError::NoImageProduced);

        rt.submit_user_message("Show me").await.unwrap();

        let state = rt.state();
        assert_eq!(
            observed_phases(&mut events),
            vec![SessionPhase::Generating, SessionPhase::Briefing]
        );
        assert!(state.gallery.is_empty());
        assert!(!state.generation_in_flight());
        assert_eq!(state.phase, SessionPhase::Briefing);
        // Primary text stands and no acknowledgement is sent
        assert_eq!(last_assistant(state), Some("Let me sketch that."));
        assert_eq!(session.sent(), vec!["Show me"]);
        assert!(session.acknowledged().is_empty());
    }

    #[tokio::test]
    async fn test_synthesis_transport_error_is_swallowed() {
        let (mut rt, session, synth) = runtime_with(briefing_state());
        session.queue_reply(
            SessionReply::from_text("One moment.").with_invocation(visualize_call(VILLA)),
        );
        synth.queue_error(SynthesisError::Request(LlmError::rate_limit("slow down")));

        rt.submit_user_message("Show me").await.unwrap();

        assert_eq!(last_assistant(rt.state()), Some("One moment."));
        assert_eq!(rt.state().phase, SessionPhase::Briefing);
    }

    #[tokio::test]
    async fn test_two_visualization_cycles() {
        let (mut rt, session, synth) = runtime_with(briefing_state());
        session
            .queue_reply(SessionReply::from_text("Sketching.").with_invocation(visualize_call(VILLA)))
            .queue_text("First concept.")
            .queue_reply(
                SessionReply::from_text("Again.").with_invocation(visualize_call("cabin, timber, fog")),
            )
            .queue_text("Second concept.");
        synth.queue_image("R1").queue_image("R2");

        rt.submit_user_message("Show me a villa").await.unwrap();
        rt.submit_user_message("Now a cabin").await.unwrap();

        let state = rt.state();
        assert_eq!(image_refs(state), vec!["R2", "R1"]);
        assert_eq!(state.gallery.history().len(), 1);

        let texts: Vec<&str> = state.transcript.turns()[1..]
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["Show me a villa", "First concept.", "Now a cabin", "Second concept."]
        );
    }

    #[tokio::test]
    async fn test_each_acknowledgement_names_its_tool() {
        let (mut rt, session, synth) = runtime();
        session
            .queue_reply(
                SessionReply::from_text("A villa it is.")
                    .with_invocation(update_call(json!({ "type": "villa" })))
                    .with_invocation(visualize_call(VILLA)),
            )
            .queue_text("Noted.")
            .queue_text("What do you think of the pool?");
        synth.queue_image("R1");

        rt.submit_user_message("A villa, and show me").await.unwrap();

        assert_eq!(
            session.acknowledged(),
            vec!["update_requirements", "generate_visualization"]
        );
        assert_eq!(
            session.sent(),
            vec!["A villa, and show me", REQUIREMENTS_ACK, VISUALIZATION_ACK]
        );
        assert_eq!(last_assistant(rt.state()), Some("What do you think of the pool?"));
    }

    #[tokio::test]
    async fn test_transport_failure_appends_fallback() {
        let (mut rt, session, _) = runtime_with(briefing_state());
        let before = rt.state().clone();
        session.queue_error(LlmError::network("connection reset"));

        rt.submit_user_message("Hello?").await.unwrap();

        let state = rt.state();
        assert_eq!(
            last_assistant(state),
            Some(
                "I apologize, but my architectural systems encountered a brief interruption. \
                 Shall we continue our discussion about your vision?"
            )
        );
        assert_eq!(state.transcript.len(), before.transcript.len() + 2);
        assert_eq!(state.phase, before.phase);
        assert_eq!(state.requirements, before.requirements);
        assert_eq!(state.gallery, before.gallery);
        assert!(!state.exchange_in_flight);
    }

    #[tokio::test]
    async fn test_requirements_ack_failure_keeps_merge() {
        let (mut rt, session, _) = runtime();
        session
            .queue_reply(
                SessionReply::from_text("Lovely.")
                    .with_invocation(update_call(json!({ "mood": "serene" }))),
            )
            .queue_error(LlmError::server_error("overloaded"));

        rt.submit_user_message("Calm, please").await.unwrap();

        let state = rt.state();
        assert_eq!(last_assistant(state), Some(FALLBACK_REPLY));
        assert_eq!(state.requirements.text(RequirementKey::Mood), Some("serene"));
        assert_eq!(state.phase, SessionPhase::Briefing);
        assert!(!state.exchange_in_flight);
    }

    #[tokio::test]
    async fn test_visualization_ack_failure_keeps_render() {
        let (mut rt, session, synth) = runtime_with(briefing_state());
        session
            .queue_reply(SessionReply::from_text("Sketching now.").with_invocation(visualize_call(VILLA)))
            .queue_error(LlmError::network("timeout"));
        synth.queue_image("R1");

        rt.submit_user_message("Show me").await.unwrap();

        let state = rt.state();
        assert_eq!(image_refs(state), vec!["R1"]);
        assert_eq!(state.phase, SessionPhase::Visualized);
        assert_eq!(last_assistant(state), Some("Sketching now."));
    }

    #[tokio::test]
    async fn test_empty_ack_text_suppresses_reply() {
        let (mut rt, session, synth) = runtime_with(briefing_state());
        let before = rt.state().transcript.len();
        session
            .queue_reply(SessionReply::from_text("Sketching.").with_invocation(visualize_call(VILLA)))
            .queue_text("");
        synth.queue_image("R1");

        rt.submit_user_message("Show me").await.unwrap();

        let state = rt.state();
        assert_eq!(state.transcript.len(), before + 1);
        assert_eq!(state.transcript.turns().last().unwrap().speaker, Speaker::User);
        assert!(!state.exchange_in_flight);
    }

    #[tokio::test]
    async fn test_unknown_and_unusable_invocations_ignored() {
        let (mut rt, session, synth) = runtime();
        session.queue_reply(
            SessionReply::from_text("Hmm.")
                .with_invocation(ToolInvocation::new("open_front_door", json!({})))
                .with_invocation(visualize_call("   ")),
        );

        rt.submit_user_message("Surprise me").await.unwrap();

        assert_eq!(rt.state().phase, SessionPhase::Discovery);
        assert_eq!(last_assistant(rt.state()), Some("Hmm."));
        assert_eq!(session.sent().len(), 1);
        assert!(synth.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_invocations_in_ack_reply_not_dispatched() {
        let (mut rt, session, synth) = runtime();
        session
            .queue_reply(
                SessionReply::from_text("Noted.")
                    .with_invocation(update_call(json!({ "type": "villa" }))),
            )
            .queue_reply(SessionReply::from_text("").with_invocation(visualize_call(VILLA)));

        rt.submit_user_message("A villa").await.unwrap();

        assert!(synth.prompts().is_empty());
        assert!(rt.state().gallery.is_empty());
        assert_eq!(rt.state().phase, SessionPhase::Briefing);
    }

    #[tokio::test]
    async fn test_tool_only_reply_without_text_adds_no_turn() {
        let (mut rt, session, _) = runtime();
        session
            .queue_reply(
                SessionReply::default().with_invocation(update_call(json!({ "budget": "1.2M" }))),
            )
            .queue_text("Understood.");

        rt.submit_user_message("Budget is 1.2M").await.unwrap();

        assert_eq!(rt.state().transcript.len(), 2);
        assert_eq!(
            rt.state().requirements.text(RequirementKey::Budget),
            Some("1.2M")
        );
    }

    #[tokio::test]
    async fn test_handle_publishes_snapshot_and_events() {
        let session = MockConversationSession::new();
        session.queue_text("Welcome aboard.");
        let handle = SessionHandle::new(SessionRuntime::new(session, MockImageSynthesizer::new()));
        let mut events = handle.subscribe();

        handle.submit("Hi").await.unwrap();

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.transcript.len(), 3);
        assert!(!snapshot.exchange_in_flight);

        let mut types = Vec::new();
        while let Ok(event) = events.try_recv() {
            types.push(event.event_type);
        }
        assert_eq!(
            types,
            vec!["exchange_started", "turn", "turn", "exchange_done"]
        );
    }

    #[tokio::test]
    async fn test_handle_rejects_blank_message() {
        let handle = SessionHandle::new(SessionRuntime::new(
            MockConversationSession::new(),
            MockImageSynthesizer::new(),
        ));

        assert_eq!(handle.submit("   ").await, Err(SubmitError::EmptyMessage));
        assert_eq!(handle.snapshot().transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_handle_rejects_concurrent_submission() {
        let gate = Arc::new(Notify::new());
        let session = MockConversationSession::gated(gate.clone());
        session.queue_text("First reply.");
        let handle = SessionHandle::new(SessionRuntime::new(session, MockImageSynthesizer::new()));

        let pending = handle.begin("First").unwrap();
        let task = tokio::spawn(pending.run());

        // Wait until the exchange is visibly in flight
        let mut state_rx = {
            let mut rx = handle.state_rx.clone();
            rx.wait_for(|s| s.exchange_in_flight).await.unwrap();
            rx
        };
        let during = handle.snapshot();
        assert_eq!(during.transcript.turns().last().unwrap().text, "First");

        assert!(matches!(
            handle.begin("Second"),
            Err(SubmitError::ExchangeInFlight)
        ));

        gate.notify_one();
        task.await.unwrap();
        state_rx.wait_for(|s| !s.exchange_in_flight).await.unwrap();

        assert!(handle.begin("Third").is_ok());
        let texts: Vec<String> = handle
            .snapshot()
            .transcript
            .turns()
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert!(!texts.contains(&"Second".to_string()));
    }

    #[tokio::test]
    async fn test_begin_publishes_user_turn_before_run() {
        let gate = Arc::new(Notify::new());
        let session = MockConversationSession::gated(gate.clone());
        session.queue_text("Tell me more.");
        let handle = SessionHandle::new(SessionRuntime::new(session.clone(), MockImageSynthesizer::new()));
        let mut events = handle.subscribe();

        let pending = handle.begin("A cottage").unwrap();

        let during = handle.snapshot();
        assert!(during.exchange_in_flight);
        assert_eq!(during.transcript.turns().last().unwrap().text, "A cottage");
        assert_eq!(events.try_recv().unwrap().event_type, "exchange_started");
        assert!(session.sent().is_empty());

        gate.notify_one();
        pending.run().await;

        let after = handle.snapshot();
        assert!(!after.exchange_in_flight);
        assert_eq!(last_assistant(&after), Some("Tell me more."));
        assert_eq!(session.sent(), vec!["A cottage"]);
    }

    #[tokio::test]
    async fn test_dropped_exchange_releases_session() {
        let handle = SessionHandle::new(SessionRuntime::new(
            MockConversationSession::new(),
            MockImageSynthesizer::new(),
        ));

        drop(handle.begin("Never sent").unwrap());

        let snapshot = handle.snapshot();
        assert!(!snapshot.exchange_in_flight);
        assert_eq!(snapshot.transcript.len(), 2);
        assert!(handle.begin("Next").is_ok());
    }

    #[tokio::test]
    async fn test_service_creates_session_with_tools() {
        let service = MockConversationService::default();
        service.session.queue_text("Hello from the mock.");

        let session = service
            .create_session("You are a strategist.", &crate::tools::definitions())
            .await
            .unwrap();
        let mut rt = SessionRuntime::new(
            LoggingSession::new(session, "mock"),
            MockImageSynthesizer::new(),
        );
        rt.submit_user_message("Hi").await.unwrap();

        let created = service.created.lock().unwrap();
        assert_eq!(created[0].0, "You are a strategist.");
        let names: Vec<&str> = created[0].1.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["update_requirements", "generate_visualization"]);
        assert_eq!(last_assistant(rt.state()), Some("Hello from the mock."));
        assert_eq!(service.session.sent(), vec!["Hi"]);
    }
}
