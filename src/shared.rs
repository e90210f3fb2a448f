//! A global transmitter slot for interrupt-driven firmware.
//!
//! Button handlers usually run in interrupt context while the transmitter is created in
//! `main()`. [`SharedTransmitter`] is a `critical_section` protected slot that both can
//! reach through a `static`.
//!
//! A transmission runs entirely inside one critical section. That keeps other interrupt
//! handlers from stretching a pulse or a gap, at the cost of blocking them for the whole
//! transmission (around 200 ms with the default three repeats).
//!
//! # Example
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::Mock as Pin;
//! use fan433::{pin::HalPin, shared::SharedTransmitter, transmitter::Transmitter};
//!
//! static FAN_TX: SharedTransmitter<HalPin<Pin>, NoopDelay> = SharedTransmitter::new();
//!
//! # let tx_pin = Pin::new(&[]);
//! FAN_TX.install(Transmitter::new(HalPin::new(tx_pin), NoopDelay::new()));
//! assert!(FAN_TX.is_installed());
//! # let mut tx = FAN_TX.take().unwrap();
//! # tx.pin_mut().inner_mut().done();
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

use crate::catalog::Command;
use crate::error::Error;
use crate::pin::PinDriver;
use crate::transmitter::{TransmitReport, Transmitter};

/// A [`Transmitter`] behind a `critical_section::Mutex`, usable from a `static`.
#[derive(Debug)]
pub struct SharedTransmitter<P, D>
where
    P: PinDriver,
    D: DelayNs,
{
    slot: Mutex<RefCell<Option<Transmitter<P, D>>>>,
}

impl<P, D> SharedTransmitter<P, D>
where
    P: PinDriver,
    D: DelayNs,
{
    /// Creates an empty slot.
    ///
    /// # Example
    /// ```rust
    /// # use embedded_hal_mock::eh1::delay::NoopDelay;
    /// # use embedded_hal_mock::eh1::digital::Mock as Pin;
    /// use fan433::{pin::HalPin, shared::SharedTransmitter};
    ///
    /// static FAN_TX: SharedTransmitter<HalPin<Pin>, NoopDelay> = SharedTransmitter::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Puts `transmitter` into the slot, returning the one it replaces.
    pub fn install(&self, transmitter: Transmitter<P, D>) -> Option<Transmitter<P, D>> {
        critical_section::with(|cs| self.slot.borrow(cs).replace(Some(transmitter)))
    }

    /// Empties the slot.
    pub fn take(&self) -> Option<Transmitter<P, D>> {
        critical_section::with(|cs| self.slot.borrow(cs).take())
    }

    /// Whether a transmitter is installed.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).borrow().is_some())
    }

    /// Runs `f` on the installed transmitter inside a critical section.
    ///
    /// # Errors
    /// [`Error::ResourceUnavailable`] if the slot is empty or already borrowed, e.g. when
    /// called from within `f`.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut Transmitter<P, D>) -> Result<R, Error>,
    ) -> Result<R, Error> {
        critical_section::with(|cs| {
            let mut slot = self
                .slot
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| Error::ResourceUnavailable)?;
            match slot.as_mut() {
                Some(transmitter) => f(transmitter),
                None => {
                    warn_!("no transmitter installed");
                    Err(Error::ResourceUnavailable)
                }
            }
        })
    }

    /// Sends `symbols` `repeat` times on the installed transmitter.
    pub fn transmit(&self, symbols: &[i32], repeat: u8) -> Result<TransmitReport, Error> {
        self.with(|tx| tx.transmit(symbols, repeat))
    }

    /// Sends a catalog command `repeat` times on the installed transmitter.
    pub fn transmit_command(
        &self,
        command: &Command,
        repeat: u8,
    ) -> Result<TransmitReport, Error> {
        self.with(|tx| tx.transmit_command(command, repeat))
    }
}

impl<P, D> Default for SharedTransmitter<P, D>
where
    P: PinDriver,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::pin::HalPin;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    type Shared = SharedTransmitter<HalPin<PinMock>, NoopDelay>;

    fn header_only(repeat: usize) -> Vec<PinTransaction> {
        let mut expected = vec![PinTransaction::set(PinState::Low)];
        for _ in 0..repeat * 12 {
            expected.push(PinTransaction::set(PinState::High));
            expected.push(PinTransaction::set(PinState::Low));
        }
        expected.push(PinTransaction::set(PinState::Low));
        expected
    }

    #[test]
    fn test_empty_slot_is_unavailable() {
        let shared = Shared::new();
        assert!(!shared.is_installed());
        assert_eq!(shared.transmit(&[0], 3), Err(Error::ResourceUnavailable));
    }

    #[test]
    fn test_transmit_through_slot() {
        let shared = Shared::new();
        let tx = Transmitter::new(
            HalPin::new(PinMock::new(&header_only(2))),
            NoopDelay::new(),
        );
        assert!(shared.install(tx).is_none());

        let report = shared.transmit_command(&catalog::LIGHT_RESET, 2).unwrap();
        assert_eq!(report.repeats_sent, 2);

        let mut tx = shared.take().unwrap();
        assert_eq!(tx.tx_good, 1);
        tx.pin_mut().inner_mut().done();
        assert!(!shared.is_installed());
    }

    #[test]
    fn test_nested_use_is_unavailable() {
        static SHARED: Shared = Shared::new();
        let tx = Transmitter::new(HalPin::new(PinMock::new(&[])), NoopDelay::new());
        assert!(SHARED.install(tx).is_none());

        let nested = SHARED.with(|_| SHARED.transmit(&[], 1));
        assert_eq!(nested, Err(Error::ResourceUnavailable));

        let mut tx = SHARED.take().unwrap();
        tx.pin_mut().inner_mut().done();
    }
}
