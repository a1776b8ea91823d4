//! Board-agnostic core logic for the ICN6211 panel driver
//!
//! This crate contains everything that does not depend on a specific
//! board:
//!
//! - Display timing model and the panel's built-in mode
//! - Register programming for the ICN6211 bridge
//! - Panel lifecycle state machine
//! - Hardware abstraction traits (DSI transport, power rail, backlight)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod bridge;
pub mod config;
pub mod error;
pub mod state;
pub mod timing;
pub mod traits;

pub use error::{ConfigError, PanelError, Resource, TimingError};
