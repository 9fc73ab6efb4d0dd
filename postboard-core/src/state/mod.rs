//! View state machine
//!
//! Two modes, summary and full text, driven by button presses, the refresh
//! timer and incoming messages. Every transition is explicit and the machine
//! never blocks.

pub mod events;
pub mod machine;

pub use events::ViewEvent;
pub use machine::{Mode, Reaction, ScrollState, ViewStateMachine};
