//! Symbol to pulse encoding for the fan remote protocol.
//!
//! A command is a list of small non-negative integers. Each integer `n` is sent as `n` long
//! carrier pulses followed by a single short pulse, so a symbol is recognised by counting
//! long pulses up to the next short one:
//!
//! ```text
//! symbol 2:   ▇▇▇ _ ▇▇▇ _ ▇ _ ___
//! symbol 0:   ▇ _ ___
//!             └ long ┘    └ short, then the symbol gap
//! ```
//!
//! ## Functions
//!
//! - [`encode`]: Converts a command into one [`PulseGroup`] per symbol
//!
//! ## Limitations
//!
//! - Pulses carry no off-time. Gaps are added by the transmitter
//! - Without `std`, storage is bounded by `MAX_SYMBOLS` and `MAX_GROUP_LEN` so that
//!   messages fit `heapless` vectors. With `std` any non-negative symbol is accepted

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::consts::{MAX_GROUP_LEN, MAX_LONG_PULSES, MAX_SYMBOLS};
use crate::error::{CommandError, Error};

/// One carrier-on interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Pulse {
    /// Carrier on for `SHORT_ON`. Closes a symbol.
    Short,
    /// Carrier on for `LONG_ON`. Counts towards the symbol value.
    Long,
}

/// The pulses encoding one symbol.
#[cfg(feature = "std")]
pub type PulseGroup = Vec<Pulse>;
/// The pulses encoding one symbol.
#[cfg(not(feature = "std"))]
pub type PulseGroup = Vec<Pulse, MAX_GROUP_LEN>;

/// An encoded command, one group per symbol.
#[cfg(feature = "std")]
pub type Message = Vec<PulseGroup>;
/// An encoded command, one group per symbol.
#[cfg(not(feature = "std"))]
pub type Message = Vec<PulseGroup, MAX_SYMBOLS>;

/// Checks that a command can be encoded without touching any storage.
///
/// # Errors
/// - [`CommandError::NegativeSymbol`] for the first negative symbol
/// - [`CommandError::TooManySymbols`] without `std`, if the command is longer than
///   `MAX_SYMBOLS`
/// - [`CommandError::SymbolTooLarge`] without `std`, for the first symbol above
///   `MAX_LONG_PULSES`
pub fn validate(symbols: &[i32]) -> Result<(), CommandError> {
    #[cfg(not(feature = "std"))]
    if symbols.len() > MAX_SYMBOLS {
        return Err(CommandError::TooManySymbols {
            len: symbols.len(),
            max: MAX_SYMBOLS,
        });
    }
    for (index, &value) in symbols.iter().enumerate() {
        if value < 0 {
            return Err(CommandError::NegativeSymbol { index, value });
        }
        #[cfg(not(feature = "std"))]
        if value as usize > MAX_LONG_PULSES {
            return Err(CommandError::SymbolTooLarge {
                index,
                value,
                max: MAX_LONG_PULSES,
            });
        }
    }
    Ok(())
}

/// Encodes a single symbol into its pulse group.
///
/// The caller has run [`validate`], so without `std` the pushes below never exceed the
/// group capacity.
fn encode_symbol(long_pulses: usize) -> PulseGroup {
    let mut group = PulseGroup::new();
    for _ in 0..long_pulses {
        let _ = group.push(Pulse::Long);
    }
    let _ = group.push(Pulse::Short);
    group
}

/// Encodes a command into pulse groups.
///
/// Group `i` holds `symbols[i]` long pulses followed by one short pulse, in input order. An
/// empty command encodes to an empty message.
///
/// # Arguments
/// - `symbols`: the command, e.g. [`catalog::FAN_LOW.symbols`](crate::catalog::FAN_LOW)
///
/// # Returns
/// The encoded message, or [`Error::InvalidCommand`] if [`validate`] rejects the command.
///
/// # Example
/// ```rust
/// use fan433::encoding::{encode, Pulse};
///
/// let message = encode(&[2, 0]).unwrap();
/// assert_eq!(message[0][..], [Pulse::Long, Pulse::Long, Pulse::Short]);
/// assert_eq!(message[1][..], [Pulse::Short]);
/// ```
pub fn encode(symbols: &[i32]) -> Result<Message, Error> {
    validate(symbols)?;
    let mut message = Message::new();
    for &value in symbols {
        let _ = message.push(encode_symbol(value as usize));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use Pulse::{Long, Short};

    fn groups(message: &Message) -> Vec<Vec<Pulse>> {
        message.iter().map(|g| g.to_vec()).collect()
    }

    #[test]
    fn test_encode_empty() {
        assert!(encode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_encode_zeros() {
        let message = encode(&[0, 0, 0]).unwrap();
        assert_eq!(groups(&message), vec![vec![Short], vec![Short], vec![Short]]);
    }

    #[test]
    fn test_encode_long_then_short() {
        let message = encode(&[2, 1]).unwrap();
        assert_eq!(
            groups(&message),
            vec![vec![Long, Long, Short], vec![Long, Short]]
        );
    }

    #[test]
    fn test_encode_preserves_order() {
        let message = encode(&[0, 3, 1]).unwrap();
        let lens: Vec<usize> = message.iter().map(|g| g.len()).collect();
        assert_eq!(lens, vec![1, 4, 2]);
    }

    #[test]
    fn test_group_shape_for_catalog() {
        for command in catalog::ALL {
            let message = encode(command.symbols).unwrap();
            assert_eq!(message.len(), command.symbols.len(), "{}", command.name);
            for (group, &n) in message.iter().zip(command.symbols) {
                let n = n as usize;
                assert_eq!(group.len(), n + 1);
                assert!(group[..n].iter().all(|&p| p == Long));
                assert_eq!(group[n], Short);
            }
        }
    }

    #[test]
    fn test_encode_rejects_negative() {
        assert_eq!(
            encode(&[1, -2, 0]),
            Err(Error::InvalidCommand(CommandError::NegativeSymbol {
                index: 1,
                value: -2
            }))
        );
    }

    #[test]
    fn test_encode_accepts_large_symbols() {
        let message = encode(&[16, 40]).unwrap();
        assert_eq!(message[0].len(), 17);
        assert_eq!(message[1].len(), 41);
        assert!(message[1][..40].iter().all(|&p| p == Long));

        let long = [1; 100];
        assert_eq!(encode(&long).unwrap().len(), 100);
    }
}
