//! Configuration type definitions
//!
//! Defaults are the values from the ICN6211/S070WV20 bring-up procedure.
//! Boards only need to override what differs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum number of DSI data lanes
pub const MAX_LANES: u8 = 4;

/// Pixel format on the DSI link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PixelFormat {
    #[default]
    Rgb888,
    Rgb666,
    Rgb666Packed,
    Rgb565,
}

impl PixelFormat {
    /// Bits per pixel on the wire
    pub fn bits_per_pixel(&self) -> u8 {
        match self {
            PixelFormat::Rgb888 | PixelFormat::Rgb666 => 24,
            PixelFormat::Rgb666Packed => 18,
            PixelFormat::Rgb565 => 16,
        }
    }
}

/// DSI link settings handed to the host on attach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DsiLinkConfig {
    /// Number of data lanes (1-4)
    pub lanes: u8,
    /// Pixel format
    pub format: PixelFormat,
    /// Send sync pulses rather than sync events in video mode
    pub sync_pulse: bool,
}

impl Default for DsiLinkConfig {
    fn default() -> Self {
        Self {
            lanes: 4,
            format: PixelFormat::Rgb888,
            sync_pulse: true,
        }
    }
}

/// Settle delays for the power sequences, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceDelays {
    /// After reset is first asserted
    pub reset_assert_ms: u32,
    /// After the enable line goes high
    pub enable_settle_ms: u32,
    /// Reset low pulse width
    pub reset_pulse_ms: u32,
    /// After reset is asserted again, before programming
    pub reset_release_ms: u32,
    /// Panel internal power-up before display on
    pub power_up_ms: u32,
    /// After entering sleep, before dropping the lines
    pub sleep_settle_ms: u32,
}

impl Default for SequenceDelays {
    fn default() -> Self {
        Self {
            reset_assert_ms: 50,
            enable_settle_ms: 50,
            reset_pulse_ms: 50,
            reset_release_ms: 20,
            power_up_ms: 120,
            sleep_settle_ms: 100,
        }
    }
}

/// Command sent on `disable()` after the backlight goes off
///
/// The vendor driver sends display-on here. `DisplayOnLegacy` keeps
/// that behavior for deployments that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DisableCommand {
    #[default]
    DisplayOff,
    DisplayOnLegacy,
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    pub link: DsiLinkConfig,
    pub delays: SequenceDelays,
    pub disable_command: DisableCommand,
}

impl PanelConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link.lanes == 0 || self.link.lanes > MAX_LANES {
            return Err(ConfigError::Invalid);
        }
        Ok(())
    }

    /// Load a config from postcard bytes
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: PanelConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Postcard)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Postcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bringup_procedure() {
        let config = PanelConfig::default();
        assert_eq!(config.link.lanes, 4);
        assert_eq!(config.link.format, PixelFormat::Rgb888);
        assert!(config.link.sync_pulse);
        assert_eq!(config.delays.reset_assert_ms, 50);
        assert_eq!(config.delays.enable_settle_ms, 50);
        assert_eq!(config.delays.reset_pulse_ms, 50);
        assert_eq!(config.delays.reset_release_ms, 20);
        assert_eq!(config.delays.power_up_ms, 120);
        assert_eq!(config.delays.sleep_settle_ms, 100);
        assert_eq!(config.disable_command, DisableCommand::DisplayOff);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lane_count_validated() {
        let mut config = PanelConfig::default();
        config.link.lanes = 0;
        assert_eq!(config.validate(), Err(ConfigError::Invalid));
        config.link.lanes = 5;
        assert_eq!(config.validate(), Err(ConfigError::Invalid));
        config.link.lanes = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bits_per_pixel() {
        assert_eq!(PixelFormat::Rgb888.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Rgb666Packed.bits_per_pixel(), 18);
        assert_eq!(PixelFormat::Rgb565.bits_per_pixel(), 16);
    }
}
