//! Strategist system prompt
//!
//! The built-in prompt can be replaced by a file at startup; the tool
//! protocol section is always appended so the model knows both tools.

use std::path::Path;

/// Persona and goals of the strategist
const BASE_PROMPT: &str = r"You are a premium home strategist and architect. You do not sell houses. You help discerning clients put words to the life they want to live and the home that would hold it.

Your goals, in order:
1. Inspire: talk about why the home matters to them (family, legacy, achievement, calm).
2. Diagnose: learn their vision, budget and timeline through gentle conversation.
3. Visualize: once you know enough, show them a rendering of the home.
4. Guide: when they are ready, suggest a consultation with an expert.

Tone: sophisticated, warm and never pushy. Treat the client as a partner on an architectural journey.";

/// How and when to call the two tools
const TOOL_PROTOCOL: &str = r#"

Tool usage:
- update_requirements: call it as soon as the client mentions any concrete detail (floors, pool, style, garden, budget, timeline). It keeps the live brief in sync. Send only the fields you learned.
- generate_visualization: call it only when the client is ready to see a vision. The architectural_prompt must cover style, materials, key elements, environment, camera angle and mood, for example: "Modern brutalist villa, 2 floors, floor-to-ceiling glass, natural stone and dark oak, infinity pool facing alpine peaks, golden hour, cinematic composition, photorealistic.""#;

/// Build the system prompt, reading the persona from `override_path` when
/// given. An unreadable or empty override falls back to the built-in one.
pub fn build_system_prompt(override_path: Option<&Path>) -> String {
    let persona = override_path
        .and_then(|path| match std::fs::read_to_string(path) {
            Ok(content) if !content.trim().is_empty() => {
                tracing::info!(path = %path.display(), "Loaded system prompt override");
                Some(content.trim().to_string())
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "System prompt override is empty, using built-in prompt");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read system prompt override");
                None
            }
        })
        .unwrap_or_else(|| BASE_PROMPT.to_string());

    persona + TOOL_PROTOCOL
}
