//! TOML panel configuration
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! ```toml
//! disable_command = "display_off"
//!
//! [link]
//! lanes = 4
//! format = "rgb888"
//! sync_pulse = true
//!
//! [delays]
//! power_up_ms = 150
//! ```

use super::types::PanelConfig;
use crate::error::ConfigError;

/// Parse TOML text into a validated `PanelConfig`
pub fn parse_config(input: &str) -> Result<PanelConfig, ConfigError> {
    let config: PanelConfig = ::toml::from_str(input).map_err(|_| ConfigError::Toml)?;
    config.validate()?;
    Ok(config)
}

