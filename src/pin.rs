//! The TX pin capability.
//!
//! The transmitter only ever needs four things from the pin: put it into output mode, drive
//! it high, drive it low, and give it back. [`PinDriver`] is that contract. [`HalPin`]
//! implements it for any `embedded-hal` [`OutputPin`], which covers every HAL crate and the
//! Linux GPIO wrappers.
//!
//! Implementations own whatever addressing the hardware needs (pin number, chip, line); the
//! transmitter never sees it.

use embedded_hal::digital::{self, OutputPin};

/// Boolean-level control of the transmitter data line.
pub trait PinDriver {
    /// Error reported by the underlying hardware.
    type Error: digital::Error;

    /// Acquires the pin and puts it in output mode, driven low.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Turns the carrier on.
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Turns the carrier off.
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Returns the pin to rest. Called once per transmission, also after a fault.
    fn release(&mut self) -> Result<(), Self::Error>;
}

impl<T: PinDriver + ?Sized> PinDriver for &mut T {
    type Error = T::Error;

    fn configure(&mut self) -> Result<(), Self::Error> {
        T::configure(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        T::set_high(self)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        T::set_low(self)
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        T::release(self)
    }
}

/// [`PinDriver`] over an `embedded-hal` output pin.
///
/// The HAL already configured the pin as an output when it handed it out, so
/// [`configure`](PinDriver::configure) and [`release`](PinDriver::release) only make sure the
/// carrier is off.
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State, Transaction};
/// use fan433::pin::{HalPin, PinDriver};
///
/// # let tx_pin = Pin::new(&[Transaction::set(State::Low), Transaction::set(State::High)]);
/// let mut pin = HalPin::new(tx_pin);
/// pin.configure().unwrap();
/// pin.set_high().unwrap();
/// # pin.into_inner().done();
/// ```
#[derive(Debug)]
pub struct HalPin<P> {
    pin: P,
}

impl<P: OutputPin> HalPin<P> {
    /// Wraps an output pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Mutable access to the wrapped pin.
    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Unwraps the pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PinDriver for HalPin<P> {
    type Error = P::Error;

    fn configure(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_hal_pin_drives_levels() {
        let tx = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
        ]);
        let mut pin = HalPin::new(tx);
        pin.configure().unwrap();
        pin.set_high().unwrap();
        pin.set_low().unwrap();
        pin.release().unwrap();
        pin.into_inner().done();
    }

    #[test]
    fn test_mut_ref_forwards() {
        let tx = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let mut pin = HalPin::new(tx);
        {
            let mut by_ref = &mut pin;
            PinDriver::set_high(&mut by_ref).unwrap();
        }
        pin.inner_mut().done();
    }
}
