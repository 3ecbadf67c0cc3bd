//! Tools offered to the strategist model
//!
//! Tools here only describe themselves and parse their arguments; applying
//! them is the dispatcher's job because both have session-wide side effects.

mod generate_visualization;
mod update_requirements;

pub use generate_visualization::{GenerateVisualizationTool, VisualizationInput};
pub use update_requirements::UpdateRequirementsTool;

use crate::llm::{ToolDefinition, ToolInvocation};
use crate::session::RequirementsDoc;
use serde_json::Value;

/// Trait for tools the conversational model can call
pub trait Tool: Send + Sync {
    /// Tool name
    fn name(&self) -> &'static str;

    /// Tool description for LLM
    fn description(&self) -> String;

    /// JSON schema for tool input
    fn input_schema(&self) -> Value;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Schemas sent when the conversational session is created
pub fn definitions() -> Vec<ToolDefinition> {
    let tools: [&dyn Tool; 2] = [&UpdateRequirementsTool, &GenerateVisualizationTool];
    tools.iter().map(|tool| tool.definition()).collect()
}

/// Strongly typed tool input
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInput {
    UpdateRequirements(RequirementsDoc),
    GenerateVisualization(VisualizationInput),
    /// Fallback for unknown tools or unusable arguments
    Unknown { name: String, input: Value },
}

impl ToolInput {
    pub fn tool_name(&self) -> &str {
        match self {
            ToolInput::UpdateRequirements(_) => UpdateRequirementsTool.name(),
            ToolInput::GenerateVisualization(_) => GenerateVisualizationTool.name(),
            ToolInput::Unknown { name, .. } => name,
        }
    }

    /// Parse a raw invocation emitted by the conversational session
    pub fn from_invocation(invocation: ToolInvocation) -> Self {
        let ToolInvocation { name, args } = invocation;
        if name == UpdateRequirementsTool.name() {
            ToolInput::UpdateRequirements(UpdateRequirementsTool::parse(args))
        } else if name == GenerateVisualizationTool.name() {
            match GenerateVisualizationTool::parse(&args) {
                Some(input) => ToolInput::GenerateVisualization(input),
                None => ToolInput::Unknown { name, input: args },
            }
        } else {
            ToolInput::Unknown { name, input: args }
        }
    }
}
