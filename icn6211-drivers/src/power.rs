//! Supply rail control
//!
//! The bridge supply is either switched by a load switch on a GPIO, or
//! hard-wired on. Both implement `PowerRail` so the panel controller
//! sequences them the same way.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use icn6211_core::traits::PowerRail;

/// Load switch driven by a GPIO
pub struct GpioPowerRail<P> {
    pin: P,
    /// If true, rail ON = pin LOW (P-channel switch)
    inverted: bool,
}

impl<P: OutputPin> GpioPowerRail<P> {
    /// Wrap a load switch pin, driving the rail off
    pub fn new(pin: P, inverted: bool) -> Result<Self, P::Error> {
        let mut rail = Self { pin, inverted };
        rail.set(false)?;
        Ok(rail)
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }

    fn set(&mut self, on: bool) -> Result<(), P::Error> {
        self.pin.set_state(PinState::from(on != self.inverted))
    }
}

impl<P: OutputPin> PowerRail for GpioPowerRail<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), P::Error> {
        self.set(true)
    }

    fn disable(&mut self) -> Result<(), P::Error> {
        self.set(false)
    }
}

/// Supply that is always on
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPowerRail;

impl PowerRail for NoPowerRail {
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
    use embedded_hal::digital::{self, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct PinError;

    impl digital::Error for PinError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct MockPin {
        high: Option<bool>,
        fail: bool,
    }

    impl ErrorType for MockPin {
        type Error = PinError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), PinError> {
            if self.fail {
                return Err(PinError);
            }
            self.high = Some(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), PinError> {
            if self.fail {
                return Err(PinError);
            }
            self.high = Some(true);
            Ok(())
        }
    }

    #[test]
    fn test_gpio_rail_starts_off() {
        let rail = GpioPowerRail::new(MockPin { high: None, fail: false }, false).unwrap();
        assert_eq!(rail.release().high, Some(false));

        let rail = GpioPowerRail::new(MockPin { high: None, fail: false }, true).unwrap();
        assert_eq!(rail.release().high, Some(true));
    }

    #[test]
    fn test_gpio_rail_switching() {
        let mut rail = GpioPowerRail::new(MockPin { high: None, fail: false }, false).unwrap();
        rail.enable().unwrap();
        assert_eq!(rail.pin.high, Some(true));
        rail.disable().unwrap();
        assert_eq!(rail.pin.high, Some(false));
    }

    #[test]
    fn test_gpio_rail_error_propagates() {
        let result = GpioPowerRail::new(MockPin { high: None, fail: true }, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_power_rail() {
        let mut rail = NoPowerRail;
        assert!(rail.enable().is_ok());
        assert!(rail.disable().is_ok());
    }
}
