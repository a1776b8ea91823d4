//! Error types shared by the core and the drivers

use crate::state::{PanelEvent, PanelState};

/// Timing values that do not fit the bridge registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Active width or height above 4095
    ResolutionOutOfRange,
    /// Sync start/end/total not in scan order
    NonMonotonic,
    /// A porch or sync width does not fit its 8-bit register
    FieldOverflow { register: u8, value: u16 },
}

/// Collaborator handles owned by the panel controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resource {
    ResetGpio,
    EnableGpio,
}

/// Errors returned by the panel lifecycle operations
///
/// Faults during a power sequence are not in this list: they are
/// logged and counted in the controller diagnostics, and the sequence
/// carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Configuration values out of range
    Config(ConfigError),
    /// A collaborator could not be brought to its initial state
    ResourceAcquisition(Resource),
    /// The DSI host refused the link configuration
    Attach,
    /// Operation called outside its precondition
    InvalidState {
        state: PanelState,
        event: PanelEvent,
    },
    /// The selected mode cannot be programmed into the bridge
    Timing(TimingError),
    /// No room to hand a mode to the host
    ModeAllocation,
}

impl From<TimingError> for PanelError {
    fn from(e: TimingError) -> Self {
        PanelError::Timing(e)
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML text could not be parsed
    Toml,
    /// Binary config could not be (de)serialized
    Postcard,
    /// Parsed values are out of range
    Invalid,
}
