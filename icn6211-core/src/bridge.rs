//! ICN6211 register programming
//!
//! The ICN6211 is configured through DSI generic writes of the form
//! `[register, value]`. Bring-up is a fixed-order sequence: select the
//! register bank, program the active resolution and the porch/sync
//! widths derived from the display timing, then replay the vendor
//! initialization table.
//!
//! # Register layout
//!
//! - `0x20`/`0x21`: low 8 bits of horizontal/vertical active size
//! - `0x22`: bits 8-11 of both sizes, horizontal in the low nibble
//! - `0x23..=0x25`: HFP, HSYNC, HBP
//! - `0x26`: reserved, written as zero
//! - `0x27..=0x29`: VFP, VSYNC, VBP
//!
//! Porch and sync fields are 8 bits wide. Rather than silently wrapping
//! a field that does not fit, [`program`] rejects the timing.

use crate::error::TimingError;
use crate::timing::DisplayTiming;
use crate::traits::DsiTransport;

/// ICN6211 register addresses
pub mod reg {
    /// Register bank select
    pub const BANK_SELECT: u8 = 0x7A;
    /// Horizontal active size, bits 0-7
    pub const HACTIVE_LI: u8 = 0x20;
    /// Vertical active size, bits 0-7
    pub const VACTIVE_LI: u8 = 0x21;
    /// Bits 8-11 of both active sizes
    pub const VACTIVE_HACTIVE_HI: u8 = 0x22;
    /// Horizontal front porch
    pub const HFP_LI: u8 = 0x23;
    /// Horizontal sync width
    pub const HSYNC_LI: u8 = 0x24;
    /// Horizontal back porch
    pub const HBP_LI: u8 = 0x25;
    /// Reserved, must be written as zero
    pub const HFP_HSW_HBP_HI: u8 = 0x26;
    /// Vertical front porch
    pub const VFP: u8 = 0x27;
    /// Vertical sync width
    pub const VSYNC: u8 = 0x28;
    /// Vertical back porch
    pub const VBP: u8 = 0x29;
}

/// MIPI DCS command codes used by the bring-up sequence
pub mod dcs {
    pub const GET_POWER_SAVE: u8 = 0x05;
    pub const ENTER_SLEEP_MODE: u8 = 0x10;
    pub const EXIT_SLEEP_MODE: u8 = 0x11;
    pub const SET_DISPLAY_OFF: u8 = 0x28;
    pub const SET_DISPLAY_ON: u8 = 0x29;
    pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
    pub const SET_TEAR_OFF: u8 = 0x34;
    pub const SET_ADDRESS_MODE: u8 = 0x36;
}

/// Value written to the bank select register
const BANK_SELECT_VALUE: u8 = 0xC1;

/// Largest active size the resolution registers can hold (12 bits)
pub const MAX_ACTIVE: u16 = 0x0FFF;

/// Number of writes derived from the timing (bank select included)
pub const TIMING_WRITES: usize = 11;

/// Total writes in a full bring-up sequence
pub const SEQUENCE_LEN: usize = TIMING_WRITES + VENDOR_INIT.len();

/// One register write: address plus a single data byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    pub addr: u8,
    pub value: u8,
}

impl RegisterWrite {
    pub const fn new(addr: u8, value: u8) -> Self {
        Self { addr, value }
    }

    /// The payload as sent in a DSI generic write
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.addr, self.value]
    }
}

/// Complete bring-up sequence, in issue order
pub type InitSequence = [RegisterWrite; SEQUENCE_LEN];

/// Vendor initialization table, replayed after the timing registers
///
/// The first ten entries reuse DCS opcodes as register addresses; the
/// last three are ICN6211-specific. Values come from the vendor bring-up
/// procedure and have no meaning derivable from the timing.
pub const VENDOR_INIT: [RegisterWrite; 13] = [
    RegisterWrite::new(dcs::SET_TEAR_OFF, 0x80),
    RegisterWrite::new(dcs::SET_ADDRESS_MODE, 0x28),
    RegisterWrite::new(0xB5, 0xA0),
    RegisterWrite::new(0x5C, 0xFF),
    RegisterWrite::new(dcs::SET_COLUMN_ADDRESS, 0x01),
    RegisterWrite::new(dcs::GET_POWER_SAVE, 0x92),
    RegisterWrite::new(0x6B, 0x71),
    RegisterWrite::new(0x69, 0x2B),
    RegisterWrite::new(dcs::ENTER_SLEEP_MODE, 0x40),
    RegisterWrite::new(dcs::EXIT_SLEEP_MODE, 0x98),
    // ICN6211 specific
    RegisterWrite::new(0xB6, 0x20),
    RegisterWrite::new(0x51, 0x20),
    RegisterWrite::new(0x09, 0x10),
];

/// Narrow a porch/sync width to its 8-bit register
fn field(register: u8, value: u16) -> Result<u8, TimingError> {
    u8::try_from(value).map_err(|_| TimingError::FieldOverflow { register, value })
}

/// Compute the full register sequence for a timing
///
/// Pure and deterministic: the same timing always yields the same
/// sequence. Fails without producing any writes if the timing does not
/// fit the chip's registers.
pub fn program(timing: &DisplayTiming) -> Result<InitSequence, TimingError> {
    if timing.h_active > MAX_ACTIVE || timing.v_active > MAX_ACTIVE {
        return Err(TimingError::ResolutionOutOfRange);
    }
    if !timing.is_monotonic() {
        return Err(TimingError::NonMonotonic);
    }

    let h = timing.h_active;
    let v = timing.v_active;
    let packed_hi = (((h >> 8) & 0xF) | (((v >> 8) & 0xF) << 4)) as u8;

    let writes: [RegisterWrite; TIMING_WRITES] = [
        RegisterWrite::new(reg::BANK_SELECT, BANK_SELECT_VALUE),
        RegisterWrite::new(reg::HACTIVE_LI, (h & 0xFF) as u8),
        RegisterWrite::new(reg::VACTIVE_LI, (v & 0xFF) as u8),
        RegisterWrite::new(reg::VACTIVE_HACTIVE_HI, packed_hi),
        RegisterWrite::new(reg::HFP_LI, field(reg::HFP_LI, timing.h_front_porch())?),
        RegisterWrite::new(reg::HSYNC_LI, field(reg::HSYNC_LI, timing.h_sync_width())?),
        RegisterWrite::new(reg::HBP_LI, field(reg::HBP_LI, timing.h_back_porch())?),
        RegisterWrite::new(reg::HFP_HSW_HBP_HI, 0x00),
        RegisterWrite::new(reg::VFP, field(reg::VFP, timing.v_front_porch())?),
        RegisterWrite::new(reg::VSYNC, field(reg::VSYNC, timing.v_sync_width())?),
        RegisterWrite::new(reg::VBP, field(reg::VBP, timing.v_back_porch())?),
    ];

    let mut seq: InitSequence = [RegisterWrite::new(0, 0); SEQUENCE_LEN];
    let (head, tail) = seq.split_at_mut(TIMING_WRITES);
    head.copy_from_slice(&writes);
    tail.copy_from_slice(&VENDOR_INIT);
    Ok(seq)
}

/// Issue a sequence over the transport, in order
///
/// Every write is attempted even if an earlier one fails. Returns the
/// number of writes that failed.
pub fn write_sequence<T: DsiTransport>(transport: &mut T, seq: &[RegisterWrite]) -> u8 {
    let mut failures: u8 = 0;
    for w in seq {
        if let Err(_e) = transport.write(w.addr, &[w.value]) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "icn6211: write {=u8:#x} <- {=u8:#x} failed: {}",
                w.addr,
                w.value,
                defmt::Debug2Format(&_e)
            );
            failures = failures.saturating_add(1);
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::DEFAULT_TIMING;
    use proptest::prelude::*;

    fn value_at(seq: &InitSequence, addr: u8) -> u8 {
        seq.iter()
            .find(|w| w.addr == addr)
            .map(|w| w.value)
            .unwrap()
    }

    #[test]
    fn test_default_mode_sequence() {
        let seq = program(&DEFAULT_TIMING).unwrap();

        let expected: [[u8; 2]; 24] = [
            [0x7A, 0xC1],
            [0x20, 0x40],
            [0x21, 0xF0],
            [0x22, 0x01],
            [0x23, 70],
            [0x24, 20],
            [0x25, 20],
            [0x26, 0x00],
            [0x27, 70],
            [0x28, 20],
            [0x29, 20],
            [0x34, 0x80],
            [0x36, 0x28],
            [0xB5, 0xA0],
            [0x5C, 0xFF],
            [0x2A, 0x01],
            [0x05, 0x92],
            [0x6B, 0x71],
            [0x69, 0x2B],
            [0x10, 0x40],
            [0x11, 0x98],
            [0xB6, 0x20],
            [0x51, 0x20],
            [0x09, 0x10],
        ];

        assert_eq!(seq.len(), SEQUENCE_LEN);
        for (w, bytes) in seq.iter().zip(expected.iter()) {
            assert_eq!(&w.to_bytes(), bytes);
        }
    }

    #[test]
    fn test_resolution_packing() {
        let timing = DisplayTiming {
            h_active: 0x140,
            v_active: 0xF0,
            ..DEFAULT_TIMING
        };
        let seq = program(&timing).unwrap();
        assert_eq!(value_at(&seq, reg::HACTIVE_LI), 0x40);
        assert_eq!(value_at(&seq, reg::VACTIVE_LI), 0xF0);
        assert_eq!(value_at(&seq, reg::VACTIVE_HACTIVE_HI), 0x01);
    }

    #[test]
    fn test_resolution_packing_high_nibbles() {
        let timing =
            DisplayTiming::from_porches(148_500, [1920, 88, 44, 148], [1080, 4, 5, 36]);
        let seq = program(&timing).unwrap();
        assert_eq!(value_at(&seq, reg::HACTIVE_LI), 0x80); // 0x780
        assert_eq!(value_at(&seq, reg::VACTIVE_LI), 0x38); // 0x438
        assert_eq!(value_at(&seq, reg::VACTIVE_HACTIVE_HI), 0x47);
        assert_eq!(value_at(&seq, reg::HBP_LI), 148);
        assert_eq!(value_at(&seq, reg::VBP), 36);
    }

    #[test]
    fn test_max_resolution_accepted() {
        let timing = DisplayTiming::from_porches(9000, [4095, 1, 1, 1], [4095, 1, 1, 1]);
        let seq = program(&timing).unwrap();
        assert_eq!(value_at(&seq, reg::VACTIVE_HACTIVE_HI), 0xFF);
    }

    #[test]
    fn test_resolution_out_of_range() {
        let timing = DisplayTiming::from_porches(9000, [4096, 1, 1, 1], [240, 1, 1, 1]);
        assert_eq!(program(&timing), Err(TimingError::ResolutionOutOfRange));
    }

    #[test]
    fn test_field_overflow_rejected() {
        let timing = DisplayTiming::from_porches(9000, [320, 256, 20, 20], [240, 70, 20, 20]);
        assert_eq!(
            program(&timing),
            Err(TimingError::FieldOverflow {
                register: reg::HFP_LI,
                value: 256
            })
        );

        let timing = DisplayTiming::from_porches(9000, [320, 70, 20, 20], [240, 70, 20, 300]);
        assert_eq!(
            program(&timing),
            Err(TimingError::FieldOverflow {
                register: reg::VBP,
                value: 300
            })
        );
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let timing = DisplayTiming {
            v_sync_end: 300,
            ..DEFAULT_TIMING
        };
        assert_eq!(program(&timing), Err(TimingError::NonMonotonic));
    }

    #[test]
    fn test_sequence_halves() {
        let seq = program(&DEFAULT_TIMING).unwrap();
        assert_eq!(seq[0], RegisterWrite::new(reg::BANK_SELECT, BANK_SELECT_VALUE));
        assert_eq!(seq[TIMING_WRITES - 1].addr, reg::VBP);
        assert_eq!(seq[TIMING_WRITES], VENDOR_INIT[0]);
        assert_eq!(seq[SEQUENCE_LEN - 1], VENDOR_INIT[VENDOR_INIT.len() - 1]);
    }

    #[test]
    fn test_vendor_table_follows_timing() {
        let seq = program(&DEFAULT_TIMING).unwrap();
        assert_eq!(&seq[TIMING_WRITES..], &VENDOR_INIT[..]);
    }

    proptest! {
        #[test]
        fn prop_deltas_match_boundaries(
            h_active in 1u16..=MAX_ACTIVE,
            v_active in 1u16..=MAX_ACTIVE,
            hfp in 0u16..=255,
            hsync in 0u16..=255,
            hbp in 0u16..=255,
            vfp in 0u16..=255,
            vsync in 0u16..=255,
            vbp in 0u16..=255,
            clock in 1000u32..=200_000,
        ) {
            let timing = DisplayTiming::from_porches(
                clock,
                [h_active, hfp, hsync, hbp],
                [v_active, vfp, vsync, vbp],
            );
            let seq = program(&timing).unwrap();

            prop_assert_eq!(value_at(&seq, reg::HFP_LI) as u16, timing.h_sync_start - timing.h_active);
            prop_assert_eq!(value_at(&seq, reg::HSYNC_LI) as u16, timing.h_sync_end - timing.h_sync_start);
            prop_assert_eq!(value_at(&seq, reg::HBP_LI) as u16, timing.h_total - timing.h_sync_end);
            prop_assert_eq!(value_at(&seq, reg::VFP) as u16, timing.v_sync_start - timing.v_active);
            prop_assert_eq!(value_at(&seq, reg::VSYNC) as u16, timing.v_sync_end - timing.v_sync_start);
            prop_assert_eq!(value_at(&seq, reg::VBP) as u16, timing.v_total - timing.v_sync_end);

            let hi = value_at(&seq, reg::VACTIVE_HACTIVE_HI) as u16;
            prop_assert_eq!((hi & 0xF) << 8 | value_at(&seq, reg::HACTIVE_LI) as u16, h_active);
            prop_assert_eq!((hi >> 4) << 8 | value_at(&seq, reg::VACTIVE_LI) as u16, v_active);
        }

        #[test]
        fn prop_program_is_deterministic(
            h_active in 1u16..=MAX_ACTIVE,
            hfp in 0u16..=300,
            vfp in 0u16..=300,
        ) {
            let timing = DisplayTiming::from_porches(
                9000,
                [h_active, hfp, 20, 20],
                [240, vfp, 20, 20],
            );
            prop_assert_eq!(program(&timing), program(&timing));
        }
    }
}
