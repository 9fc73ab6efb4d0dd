//! Display abstraction and renderer for Postboard
//!
//! This crate provides:
//! - `DisplayBackend` trait for pixel displays with two text sizes
//! - `Renderer` that draws the welcome, summary and full-text screens
//!
//! # Architecture
//!
//! `postboard-core` decides *what* is on screen and hands out a
//! [`postboard_core::Screen`]. The renderer turns that into fills and text
//! runs on any `DisplayBackend`; the firmware implements the backend for its
//! SPI panel with `embedded-graphics`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod renderer;

pub use backend::{Color, DisplayBackend, DisplayError, TextSize};
pub use renderer::Renderer;
