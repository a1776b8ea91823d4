//! Display timing model
//!
//! A `DisplayTiming` describes one scan mode as boundary positions, the
//! way a display controller counts them: active area, sync start, sync
//! end and total, per line and per frame. Porch and sync widths are
//! derived as differences between neighbouring boundaries.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum mode name length ("4095x4095" fits comfortably)
pub const MAX_MODE_NAME_LEN: usize = 16;

/// Scan timing for one display mode
///
/// Horizontal values are in pixels, vertical values in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayTiming {
    /// Pixel clock in kHz
    pub pixel_clock_khz: u32,
    pub h_active: u16,
    pub h_sync_start: u16,
    pub h_sync_end: u16,
    pub h_total: u16,
    pub v_active: u16,
    pub v_sync_start: u16,
    pub v_sync_end: u16,
    pub v_total: u16,
}

impl DisplayTiming {
    /// Build a timing from active size and porch/sync widths
    ///
    /// `h` and `v` are `[active, front_porch, sync, back_porch]`. Sums
    /// saturate at `u16::MAX`.
    pub const fn from_porches(pixel_clock_khz: u32, h: [u16; 4], v: [u16; 4]) -> Self {
        let h_sync_start = h[0].saturating_add(h[1]);
        let h_sync_end = h_sync_start.saturating_add(h[2]);
        let v_sync_start = v[0].saturating_add(v[1]);
        let v_sync_end = v_sync_start.saturating_add(v[2]);
        Self {
            pixel_clock_khz,
            h_active: h[0],
            h_sync_start,
            h_sync_end,
            h_total: h_sync_end.saturating_add(h[3]),
            v_active: v[0],
            v_sync_start,
            v_sync_end,
            v_total: v_sync_end.saturating_add(v[3]),
        }
    }

    /// Check that the boundary fields are in scan order on both axes
    pub fn is_monotonic(&self) -> bool {
        self.h_active <= self.h_sync_start
            && self.h_sync_start <= self.h_sync_end
            && self.h_sync_end <= self.h_total
            && self.v_active <= self.v_sync_start
            && self.v_sync_start <= self.v_sync_end
            && self.v_sync_end <= self.v_total
    }

    // The width accessors saturate so that a malformed timing never
    // panics; `bridge::program` checks ordering before relying on them.

    pub fn h_front_porch(&self) -> u16 {
        self.h_sync_start.saturating_sub(self.h_active)
    }

    pub fn h_sync_width(&self) -> u16 {
        self.h_sync_end.saturating_sub(self.h_sync_start)
    }

    pub fn h_back_porch(&self) -> u16 {
        self.h_total.saturating_sub(self.h_sync_end)
    }

    pub fn v_front_porch(&self) -> u16 {
        self.v_sync_start.saturating_sub(self.v_active)
    }

    pub fn v_sync_width(&self) -> u16 {
        self.v_sync_end.saturating_sub(self.v_sync_start)
    }

    pub fn v_back_porch(&self) -> u16 {
        self.v_total.saturating_sub(self.v_sync_end)
    }

    /// Vertical refresh rate in Hz, rounded to the nearest integer
    ///
    /// Returns 0 for a timing with a zero total.
    pub fn vrefresh(&self) -> u32 {
        let pixels_per_frame = self.h_total as u64 * self.v_total as u64;
        if pixels_per_frame == 0 {
            return 0;
        }
        let pixel_clock_hz = self.pixel_clock_khz as u64 * 1000;
        ((pixel_clock_hz + pixels_per_frame / 2) / pixels_per_frame) as u32
    }

    /// Mode name in the usual "WIDTHxHEIGHT" form
    pub fn name(&self) -> String<MAX_MODE_NAME_LEN> {
        let mut name = String::new();
        // 5 + 1 + 5 digits at most, always fits
        let _ = core::fmt::write(
            &mut name,
            format_args!("{}x{}", self.h_active, self.v_active),
        );
        name
    }
}

/// Mode type flags reported to the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeType(u8);

impl ModeType {
    /// Mode is built into the driver
    pub const DRIVER: ModeType = ModeType(1 << 0);
    /// Mode is the one the driver wants the host to pick
    pub const PREFERRED: ModeType = ModeType(1 << 1);

    /// Combine two sets of flags
    pub const fn union(self, other: ModeType) -> ModeType {
        ModeType(self.0 | other.0)
    }

    /// Check whether all flags in `other` are set
    pub const fn contains(self, other: ModeType) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// A timing as offered to the host, with its name and type flags
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    pub name: String<MAX_MODE_NAME_LEN>,
    pub mode_type: ModeType,
    pub timing: DisplayTiming,
}

impl DisplayMode {
    /// Wrap a timing, deriving its name
    pub fn new(timing: DisplayTiming, mode_type: ModeType) -> Self {
        Self {
            name: timing.name(),
            mode_type,
            timing,
        }
    }

    pub fn is_preferred(&self) -> bool {
        self.mode_type.contains(ModeType::PREFERRED)
    }
}

/// The only mode the S070WV20 panel supports: 320x240 at 9 MHz
///
/// Front porch 70, sync 20, back porch 20 on both axes.
pub const DEFAULT_TIMING: DisplayTiming =
    DisplayTiming::from_porches(9000, [320, 70, 20, 20], [240, 70, 20, 20]);
