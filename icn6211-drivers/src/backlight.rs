//! Backlight outputs
//!
//! Simple on/off backlight control using a GPIO pin (directly or via a
//! LED driver enable input).

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use icn6211_core::traits::Backlight;

/// GPIO backlight
///
/// Controls the backlight via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low.
pub struct GpioBacklight<P> {
    pin: P,
    /// If true, backlight ON = pin LOW
    inverted: bool,
    /// Current logical state (true = backlight on)
    on: bool,
}

impl<P: OutputPin> GpioBacklight<P> {
    /// Create a new GPIO backlight, driven off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, backlight is ON when pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, P::Error> {
        let mut backlight = Self {
            pin,
            inverted,
            on: false,
        };
        backlight.set_on(false)?;
        Ok(backlight)
    }

    /// Create a new GPIO backlight with active-high output
    pub fn new_active_high(pin: P) -> Result<Self, P::Error> {
        Self::new(pin, false)
    }

    /// Create a new GPIO backlight with active-low output
    pub fn new_active_low(pin: P) -> Result<Self, P::Error> {
        Self::new(pin, true)
    }

    /// Check if the backlight is on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }

    fn set_on(&mut self, on: bool) -> Result<(), P::Error> {
        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        self.pin.set_state(PinState::from(on != self.inverted))?;
        self.on = on;
        Ok(())
    }
}

impl<P: OutputPin> Backlight for GpioBacklight<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), P::Error> {
        self.set_on(true)
    }

    fn disable(&mut self) -> Result<(), P::Error> {
        self.set_on(false)
    }
}

/// Backlight that is not under software control
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    type Error = Infallible;

    fn enable(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            // Start high so the constructor has something to change
            Self { high: true }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_backlight() {
        let mut backlight = GpioBacklight::new_active_high(MockPin::new()).unwrap();

        // Initially off
        assert!(!backlight.is_on());
        assert!(!backlight.pin.high);

        backlight.enable().unwrap();
        assert!(backlight.is_on());
        assert!(backlight.pin.high);

        backlight.disable().unwrap();
        assert!(!backlight.is_on());
        assert!(!backlight.pin.high);
    }

    #[test]
    fn test_active_low_backlight() {
        let mut backlight = GpioBacklight::new_active_low(MockPin::new()).unwrap();

        // Initially off (pin is high for active-low)
        assert!(!backlight.is_on());
        assert!(backlight.pin.high);

        backlight.enable().unwrap();
        assert!(backlight.is_on());
        assert!(!backlight.pin.high);

        backlight.disable().unwrap();
        assert!(backlight.pin.high);
        assert!(backlight.release().high);
    }

    #[test]
    fn test_no_backlight() {
        let mut backlight = NoBacklight;
        assert!(backlight.enable().is_ok());
        assert!(backlight.disable().is_ok());
    }
}
