//! Append-only conversation transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// A single message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            speaker,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }
}

/// Ordered log of turns, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Start a transcript with the assistant's opening turn
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::assistant(greeting)],
        }
    }

    /// Append a turn. Turn ids must be unique within the transcript.
    #[must_use]
    pub fn append(mut self, turn: Turn) -> Self {
        debug_assert!(
            self.turns.iter().all(|t| t.id != turn.id),
            "duplicate turn id {}",
            turn.id
        );
        self.turns.push(turn);
        self
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg(test)]
    pub fn latest_assistant(&self) -> Option<&Turn> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Assistant)
    }
}
