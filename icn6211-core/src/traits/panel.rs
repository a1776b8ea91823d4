//! Panel trait exposed to the host display framework

use heapless::Vec;

use crate::timing::DisplayMode;

/// Operations the host framework drives a panel through
///
/// The host calls these in lifecycle order: `get_modes`, `prepare`,
/// `enable`, then `disable` and `unprepare` on the way down. Calls are
/// serialized by `&mut self`.
pub trait Panel {
    type Error;

    /// Power the panel and program the bridge
    fn prepare(&mut self) -> Result<(), Self::Error>;

    /// Turn on the display output and backlight
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Turn off the backlight and display output
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Put the panel to sleep and drop its control lines
    fn unprepare(&mut self) -> Result<(), Self::Error>;

    /// Append the supported modes to `modes`
    ///
    /// Returns the number of modes added.
    fn get_modes<const N: usize>(
        &mut self,
        modes: &mut Vec<DisplayMode, N>,
    ) -> Result<usize, Self::Error>;
}
