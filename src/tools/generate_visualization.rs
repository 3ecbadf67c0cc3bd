//! `generate_visualization` - asks for an architectural rendering

use super::Tool;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Image synthesis request built by the strategist
pub struct GenerateVisualizationTool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationInput {
    pub architectural_prompt: String,
}

impl GenerateVisualizationTool {
    /// `None` when the prompt is missing, not a string, or blank
    pub fn parse(args: &Value) -> Option<VisualizationInput> {
        let input: VisualizationInput = serde_json::from_value(args.clone()).ok()?;
        if input.architectural_prompt.trim().is_empty() {
            return None;
        }
        Some(input)
    }
}

impl Tool for GenerateVisualizationTool {
    fn name(&self) -> &'static str {
        "generate_visualization"
    }

    fn description(&self) -> String {
        "Generate an architectural visualization of the client's home. Call it only when the client is ready to see a vision.".to_string()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["architectural_prompt"],
            "properties": {
                "architectural_prompt": {
                    "type": "string",
                    "description": "Detailed, structured prompt for the image generator. Must cover style, materials, key elements, environment, camera angle, lighting and mood."
                }
            }
        })
    }
}
