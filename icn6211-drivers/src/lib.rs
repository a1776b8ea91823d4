//! Hardware driver implementations
//!
//! This crate provides concrete implementations on top of the traits
//! defined in icn6211-core:
//!
//! - Panel lifecycle controller for the S070WV20 behind an ICN6211
//! - Supply rail control (GPIO load switch, always-on)
//! - Backlight control (GPIO, uncontrolled)

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod panel;
pub mod power;

pub use backlight::{GpioBacklight, NoBacklight};
pub use panel::{Diagnostics, Icn6211Panel, PanelParts};
pub use power::{GpioPowerRail, NoPowerRail};
