//! Panel lifecycle state machine
//!
//! The panel moves through a strictly linear power cycle. Each host
//! operation is a begin/finish pair of events around a transitional
//! state, so that a controller which fails part way still reports a
//! state it can be driven out of.

use super::events::PanelEvent;

/// Panel power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Rails off, reset and enable lines low
    #[default]
    Unpowered,
    /// Power/reset handshake and register programming in progress
    Preparing,
    /// Bridge configured, display output off
    Prepared,
    /// Waiting for panel power-up, turning display and backlight on
    Enabling,
    /// Panel displaying
    Enabled,
    /// Backlight and display output going off
    Disabling,
    /// Display off, sleep, lines returning to their unpowered levels
    Unpreparing,
}

impl PanelState {
    /// Check if this is a transitional state
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            PanelState::Preparing
                | PanelState::Enabling
                | PanelState::Disabling
                | PanelState::Unpreparing
        )
    }

    /// Check if the panel is showing an image
    pub fn is_displaying(&self) -> bool {
        matches!(self, PanelState::Enabled)
    }

    /// Check if the bridge has power and configuration
    pub fn is_powered(&self) -> bool {
        !matches!(self, PanelState::Unpowered)
    }

    /// Process an event and return the next state
    ///
    /// Returns `None` if the event is not valid in this state. There is
    /// no branching: every state has exactly one way forward.
    pub fn transition(self, event: PanelEvent) -> Option<Self> {
        use PanelEvent::*;
        use PanelState::*;

        match (self, event) {
            (Unpowered, BeginPrepare) => Some(Preparing),
            (Preparing, FinishPrepare) => Some(Prepared),

            (Prepared, BeginEnable) => Some(Enabling),
            (Enabling, FinishEnable) => Some(Enabled),

            (Enabled, BeginDisable) => Some(Disabling),
            (Disabling, FinishDisable) => Some(Prepared),

            (Prepared, BeginUnprepare) => Some(Unpreparing),
            (Unpreparing, FinishUnprepare) => Some(Unpowered),

            _ => None,
        }
    }
}
