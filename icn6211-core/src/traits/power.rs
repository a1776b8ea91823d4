//! Power rail and backlight traits

use core::fmt::Debug;

/// Switched supply feeding the bridge
///
/// Boards without a switched rail use an implementation whose
/// operations always succeed.
pub trait PowerRail {
    type Error: Debug;

    /// Switch the rail on
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Switch the rail off
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Panel backlight, toggled on and off only
pub trait Backlight {
    type Error: Debug;

    fn enable(&mut self) -> Result<(), Self::Error>;

    fn disable(&mut self) -> Result<(), Self::Error>;
}
