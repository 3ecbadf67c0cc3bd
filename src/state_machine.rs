//! Session phase state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime feeds events in, commits the returned state and executes effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{SessionPhase, SessionState};
pub use transition::{transition, TransitionError};
