//! DSI transport trait
//!
//! This trait abstracts the DSI host controller that carries commands to
//! the bridge. The core never frames packets itself; it only decides
//! which bytes go out and in what order.

use core::fmt::Debug;

use crate::bridge::dcs;
use crate::config::DsiLinkConfig;

/// Command channel to a DSI peripheral
pub trait DsiTransport {
    /// Error reported by the host controller
    type Error: Debug;

    /// Attach to the DSI host with the given link settings
    fn attach(&mut self, link: &DsiLinkConfig) -> Result<(), Self::Error>;

    /// Detach from the DSI host
    fn detach(&mut self) -> Result<(), Self::Error>;

    /// Generic write: register address followed by its payload
    fn write(&mut self, address: u8, payload: &[u8]) -> Result<(), Self::Error>;

    /// DCS write: command opcode followed by its parameters
    fn dcs_write(&mut self, command: u8, params: &[u8]) -> Result<(), Self::Error>;

    /// Turn the display output on (DCS `set_display_on`)
    fn set_display_on(&mut self) -> Result<(), Self::Error> {
        self.dcs_write(dcs::SET_DISPLAY_ON, &[])
    }

    /// Turn the display output off (DCS `set_display_off`)
    fn set_display_off(&mut self) -> Result<(), Self::Error> {
        self.dcs_write(dcs::SET_DISPLAY_OFF, &[])
    }

    /// Put the peripheral into sleep mode
    fn enter_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.dcs_write(dcs::ENTER_SLEEP_MODE, &[])
    }

    /// Wake the peripheral from sleep mode
    fn exit_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.dcs_write(dcs::EXIT_SLEEP_MODE, &[])
    }
}
