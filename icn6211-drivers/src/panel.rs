//! S070WV20 panel behind an ICN6211 DSI bridge
//!
//! The controller owns every handle the panel needs (DSI transport,
//! reset and enable lines, supply rail, backlight, delay) and walks the
//! panel through its power cycle:
//!
//! ```text
//! Unpowered --prepare--> Prepared --enable--> Enabled
//!     ^                   |    ^                 |
//!     +----unprepare------+    +----disable------+
//! ```
//!
//! # Power-up handshake
//!
//! The bridge only responds if reset is toggled around the enable line
//! in this exact order: reset high, enable high, reset low, reset high,
//! each followed by its settle delay. Register programming follows.
//!
//! # Fault policy
//!
//! Once a sequence has started it always runs to the end. A failing
//! rail, line, transport write or backlight is logged and counted in
//! [`Diagnostics`]; the operation still returns `Ok` and the state still
//! advances.
//!
//! # Usage
//!
//! ```ignore
//! let mut panel = Icn6211Panel::new(parts, PanelConfig::default())?;
//! let mut modes: heapless::Vec<DisplayMode, 4> = heapless::Vec::new();
//! panel.get_modes(&mut modes)?;
//! panel.prepare()?;
//! panel.enable()?;
//! ```

#[cfg(feature = "defmt")]
use defmt::{debug, error, info, warn};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

use icn6211_core::bridge;
use icn6211_core::config::{DisableCommand, PanelConfig};
use icn6211_core::state::{PanelEvent, PanelState};
use icn6211_core::timing::{DisplayMode, DisplayTiming, ModeType, DEFAULT_TIMING};
use icn6211_core::traits::{Backlight, DsiTransport, Panel, PowerRail};
use icn6211_core::{PanelError, Resource};

/// Handles the panel controller takes ownership of
pub struct PanelParts<T, RST, EN, PWR, BL, D> {
    /// DSI host channel to the bridge
    pub transport: T,
    /// Bridge reset line
    pub reset: RST,
    /// Bridge enable line
    pub enable: EN,
    /// Supply rail (`NoPowerRail` if not switched)
    pub power: PWR,
    /// Backlight (`NoBacklight` if not controllable)
    pub backlight: BL,
    /// Blocking delay for settle times
    pub delay: D,
}

/// Counts of non-fatal faults seen since construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    pub power_failures: u8,
    pub gpio_failures: u8,
    pub transport_failures: u8,
    pub backlight_failures: u8,
}

impl Diagnostics {
    /// Check if no fault has been recorded
    pub fn is_clean(&self) -> bool {
        *self == Diagnostics::default()
    }
}

/// ICN6211 panel lifecycle controller
pub struct Icn6211Panel<T, RST, EN, PWR, BL, D> {
    transport: T,
    reset: RST,
    enable: EN,
    power: PWR,
    backlight: BL,
    delay: D,
    config: PanelConfig,
    state: PanelState,
    /// Mode handed to the host, fixed once chosen
    mode: Option<DisplayMode>,
    /// Rail was switched on by `prepare()` and must be switched off
    power_enabled: bool,
    diagnostics: Diagnostics,
}

impl<T, RST, EN, PWR, BL, D> Icn6211Panel<T, RST, EN, PWR, BL, D>
where
    T: DsiTransport,
    RST: OutputPin,
    EN: OutputPin,
    PWR: PowerRail,
    BL: Backlight,
    D: DelayNs,
{
    /// Take ownership of the panel handles and attach to the DSI host
    ///
    /// Drives reset and enable low, then attaches with the configured
    /// link settings. On failure every handle is dropped before the
    /// error is returned.
    pub fn new(
        parts: PanelParts<T, RST, EN, PWR, BL, D>,
        config: PanelConfig,
    ) -> Result<Self, PanelError> {
        config.validate().map_err(PanelError::Config)?;

        let PanelParts {
            mut transport,
            mut reset,
            mut enable,
            power,
            backlight,
            delay,
        } = parts;

        if let Err(_e) = reset.set_low() {
            #[cfg(feature = "defmt")]
            error!("icn6211: couldn't get reset GPIO: {}", defmt::Debug2Format(&_e));
            return Err(PanelError::ResourceAcquisition(Resource::ResetGpio));
        }
        if let Err(_e) = enable.set_low() {
            #[cfg(feature = "defmt")]
            error!("icn6211: couldn't get enable GPIO: {}", defmt::Debug2Format(&_e));
            return Err(PanelError::ResourceAcquisition(Resource::EnableGpio));
        }

        if let Err(_e) = transport.attach(&config.link) {
            #[cfg(feature = "defmt")]
            error!("icn6211: DSI attach failed: {}", defmt::Debug2Format(&_e));
            return Err(PanelError::Attach);
        }

        #[cfg(feature = "defmt")]
        info!(
            "icn6211: attached, {=u8} lanes, {} bpp",
            config.link.lanes,
            config.link.format.bits_per_pixel()
        );

        Ok(Self {
            transport,
            reset,
            enable,
            power,
            backlight,
            delay,
            config,
            state: PanelState::Unpowered,
            mode: None,
            power_enabled: false,
            diagnostics: Diagnostics::default(),
        })
    }

    /// Detach from the DSI host and hand back all handles
    pub fn release(mut self) -> PanelParts<T, RST, EN, PWR, BL, D> {
        if self.state.is_powered() {
            #[cfg(feature = "defmt")]
            warn!("icn6211: released while {}", self.state);
        }
        if let Err(_e) = self.transport.detach() {
            #[cfg(feature = "defmt")]
            warn!("icn6211: DSI detach failed: {}", defmt::Debug2Format(&_e));
        }

        PanelParts {
            transport: self.transport,
            reset: self.reset,
            enable: self.enable,
            power: self.power,
            backlight: self.backlight,
            delay: self.delay,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Mode selected by `get_modes`, if any
    pub fn mode(&self) -> Option<&DisplayMode> {
        self.mode.as_ref()
    }

    /// Get the configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Faults seen so far
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Next state for `event`, or the precondition error
    fn expect(&self, event: PanelEvent) -> Result<PanelState, PanelError> {
        self.state.transition(event).ok_or_else(|| {
            #[cfg(feature = "defmt")]
            warn!("icn6211: {} rejected in state {}", event, self.state);
            PanelError::InvalidState {
                state: self.state,
                event,
            }
        })
    }

    fn finish(&mut self, event: PanelEvent) {
        if let Some(next) = self.state.transition(event) {
            self.state = next;
        }
    }

    fn timing(&self) -> DisplayTiming {
        match &self.mode {
            Some(mode) => mode.timing,
            None => {
                #[cfg(feature = "defmt")]
                debug!("icn6211: no mode selected, using built-in mode");
                DEFAULT_TIMING
            }
        }
    }

    fn set_reset(&mut self, high: bool) {
        if let Err(_e) = self.reset.set_state(PinState::from(high)) {
            #[cfg(feature = "defmt")]
            warn!("icn6211: reset GPIO failed: {}", defmt::Debug2Format(&_e));
            self.diagnostics.gpio_failures = self.diagnostics.gpio_failures.saturating_add(1);
        }
    }

    fn set_enable(&mut self, high: bool) {
        if let Err(_e) = self.enable.set_state(PinState::from(high)) {
            #[cfg(feature = "defmt")]
            warn!("icn6211: enable GPIO failed: {}", defmt::Debug2Format(&_e));
            self.diagnostics.gpio_failures = self.diagnostics.gpio_failures.saturating_add(1);
        }
    }

    fn transport_result(&mut self, _what: &str, result: Result<(), T::Error>) {
        if let Err(_e) = result {
            #[cfg(feature = "defmt")]
            error!(
                "icn6211: failed to {=str}: {}",
                _what,
                defmt::Debug2Format(&_e)
            );
            self.diagnostics.transport_failures =
                self.diagnostics.transport_failures.saturating_add(1);
        }
    }

    fn backlight_result(&mut self, result: Result<(), BL::Error>) {
        if let Err(_e) = result {
            #[cfg(feature = "defmt")]
            warn!("icn6211: backlight failed: {}", defmt::Debug2Format(&_e));
            self.diagnostics.backlight_failures =
                self.diagnostics.backlight_failures.saturating_add(1);
        }
    }
}

impl<T, RST, EN, PWR, BL, D> Panel for Icn6211Panel<T, RST, EN, PWR, BL, D>
where
    T: DsiTransport,
    RST: OutputPin,
    EN: OutputPin,
    PWR: PowerRail,
    BL: Backlight,
    D: DelayNs,
{
    type Error = PanelError;

    fn prepare(&mut self) -> Result<(), PanelError> {
        let preparing = self.expect(PanelEvent::BeginPrepare)?;

        // Validate before touching any line
        let seq = bridge::program(&self.timing()).map_err(|e| {
            #[cfg(feature = "defmt")]
            error!("icn6211: mode cannot be programmed: {}", e);
            PanelError::Timing(e)
        })?;

        self.state = preparing;
        #[cfg(feature = "defmt")]
        info!("icn6211: prepare");

        match self.power.enable() {
            Ok(()) => self.power_enabled = true,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                error!(
                    "icn6211: failed to enable power rail: {}",
                    defmt::Debug2Format(&_e)
                );
                self.diagnostics.power_failures =
                    self.diagnostics.power_failures.saturating_add(1);
            }
        }

        let delays = self.config.delays;

        self.set_reset(true);
        self.delay.delay_ms(delays.reset_assert_ms);

        self.set_enable(true);
        self.delay.delay_ms(delays.enable_settle_ms);

        self.set_reset(false);
        self.delay.delay_ms(delays.reset_pulse_ms);

        self.set_reset(true);
        self.delay.delay_ms(delays.reset_release_ms);

        let failed = bridge::write_sequence(&mut self.transport, &seq);
        if failed > 0 {
            #[cfg(feature = "defmt")]
            warn!(
                "icn6211: {=u8} of {=usize} init writes failed",
                failed,
                seq.len()
            );
            self.diagnostics.transport_failures =
                self.diagnostics.transport_failures.saturating_add(failed);
        }

        self.finish(PanelEvent::FinishPrepare);
        #[cfg(feature = "defmt")]
        info!("icn6211: prepare done");
        Ok(())
    }

    fn enable(&mut self) -> Result<(), PanelError> {
        self.state = self.expect(PanelEvent::BeginEnable)?;
        #[cfg(feature = "defmt")]
        info!("icn6211: enable");

        self.delay.delay_ms(self.config.delays.power_up_ms);

        let result = self.transport.set_display_on();
        self.transport_result("set display on", result);

        let result = self.backlight.enable();
        self.backlight_result(result);

        self.finish(PanelEvent::FinishEnable);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PanelError> {
        self.state = self.expect(PanelEvent::BeginDisable)?;
        #[cfg(feature = "defmt")]
        info!("icn6211: disable");

        let result = self.backlight.disable();
        self.backlight_result(result);

        match self.config.disable_command {
            DisableCommand::DisplayOff => {
                let result = self.transport.set_display_off();
                self.transport_result("set display off", result);
            }
            DisableCommand::DisplayOnLegacy => {
                let result = self.transport.set_display_on();
                self.transport_result("set display on", result);
            }
        }

        self.finish(PanelEvent::FinishDisable);
        Ok(())
    }

    fn unprepare(&mut self) -> Result<(), PanelError> {
        self.state = self.expect(PanelEvent::BeginUnprepare)?;
        #[cfg(feature = "defmt")]
        info!("icn6211: unprepare");

        let result = self.transport.set_display_off();
        self.transport_result("set display off", result);

        let result = self.transport.enter_sleep_mode();
        self.transport_result("enter sleep mode", result);

        self.delay.delay_ms(self.config.delays.sleep_settle_ms);

        self.set_reset(false);
        self.set_reset(true);
        self.set_enable(false);
        self.set_reset(false);

        if self.power_enabled {
            if let Err(_e) = self.power.disable() {
                #[cfg(feature = "defmt")]
                warn!(
                    "icn6211: failed to disable power rail: {}",
                    defmt::Debug2Format(&_e)
                );
                self.diagnostics.power_failures =
                    self.diagnostics.power_failures.saturating_add(1);
            }
            self.power_enabled = false;
        }

        self.finish(PanelEvent::FinishUnprepare);
        #[cfg(feature = "defmt")]
        info!("icn6211: unprepare done");
        Ok(())
    }

    fn get_modes<const N: usize>(
        &mut self,
        modes: &mut Vec<DisplayMode, N>,
    ) -> Result<usize, PanelError> {
        let mode = match &self.mode {
            Some(mode) => mode.clone(),
            None => DisplayMode::new(
                DEFAULT_TIMING,
                ModeType::DRIVER.union(ModeType::PREFERRED),
            ),
        };

        if modes.push(mode.clone()).is_err() {
            #[cfg(feature = "defmt")]
            error!(
                "icn6211: failed to add mode {=u16}x{=u16}@{=u32}",
                mode.timing.h_active,
                mode.timing.v_active,
                mode.timing.vrefresh()
            );
            return Err(PanelError::ModeAllocation);
        }

        self.mode = Some(mode);
        Ok(1)
    }
}
