//! Common types for the conversational and image collaborators

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool schema declared when a session is created
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// A named tool call embedded in a model reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub args: Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// One reply from the conversational session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReply {
    /// Concatenated visible text; may be empty when the model only calls tools
    pub text: String,
    /// Tool calls in the order the model emitted them
    pub invocations: Vec<ToolInvocation>,
}

impl SessionReply {
    #[cfg(test)]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            invocations: vec![],
        }
    }

    #[cfg(test)]
    pub fn with_invocation(mut self, invocation: ToolInvocation) -> Self {
        self.invocations.push(invocation);
        self
    }

    pub fn has_invocations(&self) -> bool {
        !self.invocations.is_empty()
    }
}

/// Output framing for synthesized images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 16:9, the only framing renders are produced in
    #[default]
    Widescreen,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
        }
    }
}
