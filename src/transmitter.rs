//! Blocking transmitter for the fan remote protocol.
//!
//! This module provides the [`Transmitter`] struct, which bit-bangs encoded commands onto a
//! TX pin. Pulse widths and gaps are produced with a [`DelayNs`] provider, one blocking wait
//! at a time, because the receiver decodes purely from relative timing: any reordering or
//! preemption in the middle of a frame corrupts it.
//!
//! ## Frame layout
//!
//! Every repeat is sent as:
//!
//! 1. **Header**: `sync_pulses` × (short pulse, pulse gap), then `header_wait - short_off`
//! 2. **Body**: for each symbol, each pulse followed by the pulse gap, then the symbol gap
//! 3. **Inter-repeat**: `send_wait - short_off`, skipped after the last repeat
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State, Transaction};
//! use fan433::{catalog, pin::HalPin, transmitter::Transmitter};
//!
//! # let mut expected = vec![Transaction::set(State::Low)];
//! # for _ in 0..2 * 12 {
//! #     expected.push(Transaction::set(State::High));
//! #     expected.push(Transaction::set(State::Low));
//! # }
//! # expected.push(Transaction::set(State::Low));
//! # let tx_pin = Pin::new(&expected);
//! let mut transmitter = Transmitter::new(HalPin::new(tx_pin), NoopDelay::new());
//!
//! let report = transmitter.transmit_command(&catalog::LIGHT_RESET, 2).unwrap();
//! assert_eq!(report.repeats_sent, 2);
//! # transmitter.pin_mut().inner_mut().done();
//! ```
//!
//! ## Failure handling
//!
//! Commands are validated before the pin is touched. Once the pin is configured, a fault
//! aborts the transmission straight away, but [`PinDriver::release`] is still called exactly
//! once. Nothing is retried; repeats already on air cannot be taken back.

use embedded_hal::delay::DelayNs;

use crate::catalog::Command;
use crate::consts::DEFAULT_REPEAT;
use crate::encoding::{Message, encode};
use crate::error::{CommandError, Error, Phase};
use crate::pin::PinDriver;
use crate::timing::{Schedule, Timing};

/// Outcome of a completed [`Transmitter::transmit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TransmitReport {
    /// Number of complete frames put on air.
    pub repeats_sent: u8,
    /// Whether the caller stopped the transmission before all repeats were sent.
    pub cancelled: bool,
}

/// A bit-banging transmitter for the fan remote protocol.
///
/// Owns the TX pin capability and a delay provider for its whole lifetime; a transmission
/// borrows the transmitter mutably, so nothing else can drive the pin meanwhile.
///
/// ## Type Parameters
///
/// - `P`: the TX pin, see [`PinDriver`] and [`HalPin`](crate::pin::HalPin)
/// - `D`: a delay provider implementing [`embedded_hal::delay::DelayNs`]
///
/// ## Notes
///
/// - A frame of a 30 symbol command lasts roughly 50 ms, a default transmission roughly
///   200 ms, all of it blocking.
/// - The delay provider decides the timing accuracy. Busy-wait delays are preferable to
///   scheduler sleeps.
#[derive(Debug)]
pub struct Transmitter<P, D>
where
    P: PinDriver,
    D: DelayNs,
{
    pin: P,
    delay: D,
    schedule: Schedule,

    /// Counter of transmissions that sent every requested repeat or were cancelled cleanly.
    pub tx_good: u16,

    /// Counter of transmissions that ended with a pin fault.
    pub tx_bad: u16,
}

impl<P, D> Transmitter<P, D>
where
    P: PinDriver,
    D: DelayNs,
{
    /// Creates a transmitter with the calibrated default timing.
    ///
    /// The pin is not touched until the first transmission.
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            schedule: Schedule::default(),
            tx_good: 0,
            tx_bad: 0,
        }
    }

    /// Creates a transmitter with custom timing.
    ///
    /// # Errors
    /// [`Error::InvalidTiming`] if `timing` fails [`Timing::validate`].
    pub fn with_timing(pin: P, delay: D, timing: &Timing) -> Result<Self, Error> {
        let schedule = timing.schedule()?;
        Ok(Self {
            schedule,
            ..Self::new(pin, delay)
        })
    }

    /// The timing in use, in nanoseconds.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Shared access to the pin.
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Mutable access to the pin.
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Gives back the pin and the delay provider.
    pub fn into_parts(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Sends a catalog command `repeat` times.
    pub fn transmit_command(
        &mut self,
        command: &Command,
        repeat: u8,
    ) -> Result<TransmitReport, Error> {
        debug!("sending {}", command.name);
        self.transmit(command.symbols, repeat)
    }

    /// Sends a command [`DEFAULT_REPEAT`] times.
    pub fn transmit_default(&mut self, symbols: &[i32]) -> Result<TransmitReport, Error> {
        self.transmit(symbols, DEFAULT_REPEAT)
    }

    /// Encodes `symbols` and sends the frame `repeat` times.
    ///
    /// # Arguments
    /// - `symbols`: the command, one long pulse count per symbol
    /// - `repeat`: number of frames, at least 1
    ///
    /// # Errors
    /// - [`Error::InvalidCommand`]: bad symbols or a zero repeat count; the pin is untouched
    /// - [`Error::ResourceUnavailable`]: the pin could not be configured
    /// - [`Error::DriverFault`]: the pin failed mid-frame or on release
    pub fn transmit(&mut self, symbols: &[i32], repeat: u8) -> Result<TransmitReport, Error> {
        self.transmit_until(symbols, repeat, || false)
    }

    /// Like [`transmit`](Self::transmit), but asks `should_stop` before each repeat after
    /// the first.
    ///
    /// Frames are never cut short: the check only happens once a frame is complete, and a
    /// stopped transmission skips the wait that would have preceded the next frame.
    pub fn transmit_until<F>(
        &mut self,
        symbols: &[i32],
        repeat: u8,
        should_stop: F,
    ) -> Result<TransmitReport, Error>
    where
        F: FnMut() -> bool,
    {
        if repeat == 0 {
            return Err(CommandError::ZeroRepeat.into());
        }
        let message = encode(symbols)?;
        info!(
            "transmitting {} symbols, {} repeats",
            message.len(),
            repeat
        );

        let result = match self.pin.configure() {
            Ok(()) => self.send_frames(&message, repeat, should_stop),
            Err(_) => {
                error!("could not configure the TX pin");
                Err(Error::ResourceUnavailable)
            }
        };

        let released = self.pin.release();

        let result = match (result, released) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(e)) => {
                error!("could not release the TX pin");
                Err(Error::driver_fault(Phase::Release, e))
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(_)) => {
                warn_!("could not release the TX pin after a failed transmission");
                Err(e)
            }
        };

        match result {
            Ok(_) => self.tx_good = self.tx_good.wrapping_add(1),
            Err(_) => self.tx_bad = self.tx_bad.wrapping_add(1),
        }
        result
    }

    fn send_frames<F>(
        &mut self,
        message: &Message,
        repeat: u8,
        mut should_stop: F,
    ) -> Result<TransmitReport, Error>
    where
        F: FnMut() -> bool,
    {
        for sent in 1..=repeat {
            debug!("repeat {} of {}", sent, repeat);
            self.send_header()?;
            self.send_body(message)?;

            if sent == repeat {
                break;
            }
            if should_stop() {
                info!("transmission stopped after {} of {} repeats", sent, repeat);
                return Ok(TransmitReport {
                    repeats_sent: sent,
                    cancelled: true,
                });
            }
            self.delay.delay_ns(self.schedule.send_residual_ns);
        }
        Ok(TransmitReport {
            repeats_sent: repeat,
            cancelled: false,
        })
    }

    fn send_header(&mut self) -> Result<(), Error> {
        for _ in 0..self.schedule.sync_pulses {
            self.send_pulse(self.schedule.short_on_ns, Phase::Header)?;
        }
        self.delay.delay_ns(self.schedule.header_residual_ns);
        Ok(())
    }

    fn send_body(&mut self, message: &Message) -> Result<(), Error> {
        for (index, group) in message.iter().enumerate() {
            trace!("symbol {}: {} pulses", index, group.len());
            for &pulse in group.iter() {
                self.send_pulse(self.schedule.pulse_ns(pulse), Phase::Body)?;
            }
            self.delay.delay_ns(self.schedule.long_off_ns);
        }
        Ok(())
    }

    /// Carrier on for `high_ns`, then off for the pulse gap.
    fn send_pulse(&mut self, high_ns: u32, phase: Phase) -> Result<(), Error> {
        self.pin.set_high().map_err(|e| {
            error!("pin fault while raising the carrier in {:?}", phase);
            Error::driver_fault(phase, e)
        })?;
        self.delay.delay_ns(high_ns);
        self.pin.set_low().map_err(|e| {
            error!("pin fault while dropping the carrier in {:?}", phase);
            Error::driver_fault(phase, e)
        })?;
        self.delay.delay_ns(self.schedule.short_off_ns);
        Ok(())
    }
}

/// Sends `symbols` once-off over `pin` and `delay` with the default timing.
///
/// Convenience for callers that do not keep a [`Transmitter`] around. `pin` and `delay` may
/// be mutable references, so the caller keeps ownership.
pub fn transmit<P, D>(
    symbols: &[i32],
    pin: P,
    delay: D,
    repeat: u8,
) -> Result<TransmitReport, Error>
where
    P: PinDriver,
    D: DelayNs,
{
    Transmitter::new(pin, delay).transmit(symbols, repeat)
}
