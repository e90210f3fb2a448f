//! Error type shared by the encoder and the transmitter.

use embedded_hal::digital::{self, ErrorKind};
use thiserror::Error;

/// Why a command could not be encoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum CommandError {
    /// A symbol asked for a negative number of long pulses.
    #[error("symbol {index} is negative ({value})")]
    NegativeSymbol {
        /// Position of the offending symbol.
        index: usize,
        /// The value found there.
        value: i32,
    },
    /// A symbol asked for more long pulses than a group can hold.
    #[error("symbol {index} has {value} long pulses, at most {max} are supported")]
    SymbolTooLarge {
        /// Position of the offending symbol.
        index: usize,
        /// The value found there.
        value: i32,
        /// The largest accepted value.
        max: usize,
    },
    /// The command has more symbols than a message can hold.
    #[error("command has {len} symbols, at most {max} are supported")]
    TooManySymbols {
        /// Number of symbols in the command.
        len: usize,
        /// The largest accepted length.
        max: usize,
    },
    /// A fan speed percentage above 100.
    #[error("fan speed {0}% is out of range")]
    PercentOutOfRange(u8),
    /// A transmission was requested with a repeat count of zero.
    #[error("repeat count must be at least 1")]
    ZeroRepeat,
}

/// The part of a frame that was being sent when the pin failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Phase {
    /// Sync pulses and the wait after them.
    Header,
    /// The pulse groups of the command.
    Body,
    /// Putting the pin back to rest after the last repeat.
    Release,
}

/// Errors reported by this crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The command is malformed. Nothing was sent.
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] CommandError),
    /// The pin refused a level change. Repeats already on air cannot be taken back.
    #[error("pin driver fault during {phase:?}: {kind}")]
    DriverFault {
        /// Where in the frame the fault happened.
        phase: Phase,
        /// What the pin reported.
        kind: ErrorKind,
    },
    /// The pin could not be acquired or configured, or no transmitter is installed.
    #[error("transmitter resource unavailable")]
    ResourceUnavailable,
    /// A timing configuration broke one of the positivity rules.
    #[error("invalid timing: {0}")]
    InvalidTiming(&'static str),
}

impl Error {
    /// Builds a [`Error::DriverFault`] from any `embedded-hal` digital error.
    pub fn driver_fault<E: digital::Error>(phase: Phase, err: E) -> Self {
        Self::DriverFault {
            phase,
            kind: err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_converts() {
        let err: Error = CommandError::NegativeSymbol { index: 2, value: -1 }.into();
        assert_eq!(
            err,
            Error::InvalidCommand(CommandError::NegativeSymbol { index: 2, value: -1 })
        );
    }

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidCommand(CommandError::TooManySymbols { len: 40, max: 32 });
        assert_eq!(
            err.to_string(),
            "invalid command: command has 40 symbols, at most 32 are supported"
        );

        let err = Error::DriverFault {
            phase: Phase::Body,
            kind: ErrorKind::Other,
        };
        assert!(err.to_string().starts_with("pin driver fault during Body"));
    }
}
