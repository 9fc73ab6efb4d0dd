//! Board-agnostic core logic for Postboard
//!
//! This crate contains all decision logic that does not depend on the
//! display panel or the microcontroller:
//!
//! - Post model fed by decoded protocol messages
//! - Greedy word-wrap layout and content height estimation
//! - View state machine (summary / full text, scrolling, refresh timer)
//! - Button debouncing
//! - View configuration (geometry, timing)
//! - Controller tying the above into one cooperative poll step

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod controller;
pub mod debounce;
pub mod layout;
pub mod model;
pub mod state;

pub use config::ViewConfig;
pub use controller::{Controller, FullTextScreen, Outcome, Screen, ScrollHint};
pub use debounce::ButtonDebouncer;
pub use layout::{Line, LayoutResult, SizeProfile};
pub use model::{PostModel, PostSummary};
pub use state::{Mode, ScrollState, ViewEvent, ViewStateMachine};
