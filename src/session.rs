//! Session data models
//!
//! Leaf aggregates the state machine composes into a `SessionState`: the
//! requirements brief, the conversation transcript and the render gallery.

mod gallery;
mod requirements;
mod transcript;

pub use gallery::{Gallery, ImageRef, Render};
pub use requirements::{BriefEntry, RequirementKey, RequirementsDoc};
pub use transcript::{Transcript, Turn};

#[cfg(test)]
pub use transcript::Speaker;
