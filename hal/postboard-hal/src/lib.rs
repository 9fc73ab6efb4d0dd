//! Postboard Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the board-agnostic
//! crates need. Chip-specific code (the RP2040 firmware) implements them on
//! top of its own peripheral drivers, so the core logic can be driven and
//! tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  postboard-core / postboard-protocol    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  postboard-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  postboard-firmware (embassy-rp impls)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (the mode button)
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the producer

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level};
pub use uart::{UartRx, UartTx};
