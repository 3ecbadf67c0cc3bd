//! Generated renderings, most recent first

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque locator for a rendered image (data URI or URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    #[cfg(test)]
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Build a `data:` URI from a base64 payload
    pub fn data_uri(mime_type: &str, base64_data: &str) -> Self {
        Self(format!("data:{mime_type};base64,{base64_data}"))
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Data URIs can be megabytes long
        if self.0.starts_with("data:") {
            let header = self.0.split(',').next().unwrap_or("data:");
            write!(f, "{header},<{} bytes>", self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}

/// One generated image plus its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Render {
    pub id: String,
    pub image_ref: ImageRef,
    pub source_prompt: String,
    pub created_at: DateTime<Utc>,
}

impl Render {
    pub fn new(image_ref: ImageRef, source_prompt: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_ref,
            source_prompt: source_prompt.into(),
            created_at: Utc::now(),
        }
    }
}

/// Renders ordered most-recent-first; the head is the active one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallery {
    renders: Vec<Render>,
}

impl Gallery {
    #[must_use]
    pub fn prepend(mut self, render: Render) -> Self {
        self.renders.insert(0, render);
        self
    }

    pub fn active(&self) -> Option<&Render> {
        self.renders.first()
    }

    pub fn history(&self) -> &[Render] {
        self.renders.get(1..).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn renders(&self) -> &[Render] {
        &self.renders
    }

    pub fn len(&self) -> usize {
        self.renders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }
}
