//! Compiled-in configuration
//!
//! Generated by build.rs from postboard.toml.

use postboard_core::{SizeProfile, ViewConfig};
use postboard_hal::uart::UartConfig;

include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// Serial settings of the producer link
pub fn serial_config() -> UartConfig {
    UartConfig {
        baudrate: SERIAL_BAUDRATE,
        ..UartConfig::default()
    }
}
