//! Google Gemini conversational session
//!
//! The REST API is stateless, so the session keeps the turn history itself
//! and replays it on every request.

use super::types::{SessionReply, ToolDefinition, ToolInvocation};
use super::LlmError;
use crate::runtime::{ConversationService, ConversationSession};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const PUBLIC_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Result reported for a function call that was never acknowledged
const NOT_EXECUTED: &str = "Not executed.";

/// HTTP access to `generateContent`, shared by chat and image services
pub(super) struct GeminiEndpoint {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiEndpoint {
    pub(super) fn new(api_key: String, gateway: Option<&str>) -> Result<Self, LlmError> {
        let base_url = match gateway {
            Some(gw) => format!("{}/gemini/v1beta", gw.trim_end_matches('/')),
            None => PUBLIC_BASE_URL.to_string(),
        };

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn url(&self, model: &str) -> String {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        if self.api_key.starts_with("implicit") {
            // Gateway mode - key in URL not needed
            url
        } else {
            format!("{url}?key={}", self.api_key)
        }
    }

    pub(super) async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, LlmError> {
        let response = self
            .client
            .post(self.url(model))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map_or(body, |error_resp| error_resp.error.message);
            return Err(LlmError::from_status(status.as_u16(), &message));
        }

        serde_json::from_str(&body)
            .map_err(|e| LlmError::unknown(format!("Failed to parse response: {e}")))
    }
}

/// Creates chat sessions against one Gemini model
pub struct GeminiConversationService {
    endpoint: Arc<GeminiEndpoint>,
    model: String,
}

impl GeminiConversationService {
    pub(super) fn new(endpoint: Arc<GeminiEndpoint>, model: impl Into<String>) -> Self {
        Self {
            endpoint,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ConversationService for GeminiConversationService {
    type Session = GeminiSession;

    async fn create_session(
        &self,
        system_prompt: &str,
        tools: &[ToolDefinition],
    ) -> Result<GeminiSession, LlmError> {
        tracing::info!(model = %self.model, tools = tools.len(), "Creating Gemini chat session");
        Ok(GeminiSession {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            system_instruction: GeminiContent::system(system_prompt),
            tools: translate_tools(tools),
            history: Vec::new(),
            pending_calls: Vec::new(),
        })
    }
}

/// A chat with retained history
pub struct GeminiSession {
    endpoint: Arc<GeminiEndpoint>,
    model: String,
    system_instruction: GeminiContent,
    tools: Option<Vec<GeminiTool>>,
    history: Vec<GeminiContent>,
    /// Function calls from the last model turn still awaiting a response
    pending_calls: Vec<String>,
}

impl GeminiSession {
    /// Next user-side content
    ///
    /// Every function call of the last model turn is answered by name: the
    /// call to `tool` gets `text` as its result and any other call is
    /// reported as not executed. Text that answers no call goes out as its
    /// own part.
    fn user_content(&self, text: &str, tool: Option<&str>) -> GeminiContent {
        let mut answered = false;
        let mut parts: Vec<GeminiPart> = self
            .pending_calls
            .iter()
            .map(|name| {
                let result = if answered || tool != Some(name.as_str()) {
                    NOT_EXECUTED
                } else {
                    answered = true;
                    text
                };
                GeminiPart::function_response(name, result)
            })
            .collect();
        if !answered {
            parts.push(GeminiPart::text(text));
        }

        GeminiContent {
            role: Some("user".to_string()),
            parts,
        }
    }

    fn build_request(&self) -> GeminiRequest {
        GeminiRequest {
            contents: self.history.clone(),
            system_instruction: Some(self.system_instruction.clone()),
            tools: self.tools.clone(),
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: Some(MAX_OUTPUT_TOKENS),
                image_config: None,
            }),
        }
    }

    async fn exchange(&mut self, content: GeminiContent) -> Result<SessionReply, LlmError> {
        self.history.push(content);
        let request = self.build_request();

        let result = self
            .endpoint
            .generate_content(&self.model, &request)
            .await
            .and_then(normalize_response);

        match result {
            Ok((model_content, reply)) => {
                self.pending_calls = reply.invocations.iter().map(|i| i.name.clone()).collect();
                self.history.push(model_content);
                Ok(reply)
            }
            Err(e) => {
                // Keep history alternating so the next send is well-formed
                self.history.pop();
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ConversationSession for GeminiSession {
    async fn send_turn(&mut self, text: &str) -> Result<SessionReply, LlmError> {
        let content = self.user_content(text, None);
        self.exchange(content).await
    }

    async fn send_tool_result(
        &mut self,
        tool: &str,
        result: &str,
    ) -> Result<SessionReply, LlmError> {
        let content = self.user_content(result, Some(tool));
        self.exchange(content).await
    }
}

fn translate_tools(tools: &[ToolDefinition]) -> Option<Vec<GeminiTool>> {
    if tools.is_empty() {
        return None;
    }
    Some(vec![GeminiTool {
        function_declarations: tools
            .iter()
            .map(|t| GeminiFunctionDeclaration {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.input_schema.clone(),
            })
            .collect(),
    }])
}

/// Split the first candidate into the content to keep in history and the
/// reply handed to the runtime
fn normalize_response(resp: GeminiResponse) -> Result<(GeminiContent, SessionReply), LlmError> {
    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::unknown("No candidates in response"))?;

    let mut content = candidate.content.ok_or_else(|| {
        LlmError::unknown(format!(
            "Candidate has no content (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ))
    })?;
    content.role = Some("model".to_string());

    let mut reply = SessionReply::default();
    for part in &content.parts {
        if let Some(text) = &part.text {
            if part.thought != Some(true) {
                reply.text.push_str(text);
            }
        }
        if let Some(call) = &part.function_call {
            let args = if call.args.is_null() {
                json!({})
            } else {
                call.args.clone()
            };
            reply
                .invocations
                .push(ToolInvocation::new(call.name.clone(), args));
        }
    }

    Ok((content, reply))
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiRequest {
    pub(super) contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) tools: Option<Vec<GeminiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) role: Option<String>,
    #[serde(default)]
    pub(super) parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub(super) fn user_text(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::text(text)],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![GeminiPart::text(text)],
        }
    }
}

/// A content part; exactly one payload field is set in practice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) thought: Option<bool>,
    /// Opaque signature that must be replayed with the part it came with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) thought_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) function_call: Option<GeminiFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) function_response: Option<GeminiFunctionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) inline_data: Option<GeminiBlob>,
}

impl GeminiPart {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    fn function_response(name: &str, result: &str) -> Self {
        Self {
            function_response: Some(GeminiFunctionResponse {
                name: name.to_string(),
                response: json!({ "result": result }),
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct GeminiFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiBlob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) mime_type: Option<String>,
    #[serde(default)]
    pub(super) data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiTool {
    function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiFunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) image_config: Option<GeminiImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiImageConfig {
    pub(super) aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiResponse {
    #[serde(default)]
    pub(super) candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeminiCandidate {
    #[serde(default)]
    pub(super) content: Option<GeminiContent>,
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
