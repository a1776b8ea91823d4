//! Configuration types
//!
//! Panel configuration can be persisted as postcard binary data or
//! loaded from TOML (`toml` feature).

#[cfg(feature = "toml")]
pub mod toml;
pub mod types;

#[cfg(feature = "toml")]
pub use self::toml::parse_config;
pub use types::*;
