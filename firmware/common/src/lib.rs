//! Rotary-encoder menu engine for a small embedded display.
//!
//! This crate contains the platform-agnostic core shared between the Pico 2
//! firmware and the desktop simulator:
//!
//! - [`input`]: Lock-free encoder/button handoff, detent and click edges
//! - [`registry`]: Menu items, value clamping and derived labels
//! - [`menu`]: Browse/Edit state machine and scrolling viewport
//! - [`view`]: Draw command generation with dirty-zone tracking
//! - [`status`]: Full-screen status readouts and confirmations
//! - [`display`]: Display trait and the embedded-graphics adaptor
//! - [`engine`]: The main loop tying everything to the hardware collaborators
//! - [`log`]: Ring buffer of menu events
//! - [`config`]: Layout, timing and capacity constants
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation-free. Tests run on the host with std.
//! Enable the `defmt` feature on embedded targets to get `defmt::Format`
//! derives and engine trace output.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
mod fmt;

pub mod colors;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod log;
pub mod menu;
pub mod peripherals;
pub mod presets;
pub mod registry;
pub mod status;
pub mod view;

// Re-export commonly used items
pub use display::{GraphicsDisplay, MenuDisplay};
pub use engine::MenuEngine;
pub use error::{InitError, RegistryError};
pub use input::{EncoderInput, InputEvent, InputHandoff, InputSource};
pub use menu::{MenuAction, MenuStateMachine, NavigationState, Page};
pub use peripherals::{Actuators, Clock, MoistureSensor, Readout, TimeOfDay};
pub use registry::{ItemRegistry, MenuItem};
