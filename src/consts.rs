//! Timing and framing constants of the fan remote protocol.
//!
//! Every duration is in seconds and is written as the difference of the two timestamps it
//! was measured between on a logic analyzer capture of the stock remote. Keeping the raw
//! timestamps makes it obvious where a value came from when it needs recalibrating.
//!
//! ## Key Concepts
//!
//! - **Pulses**: the carrier is either on for [`SHORT_ON`] or for [`LONG_ON`].
//! - **Gaps**: every pulse is followed by [`SHORT_OFF`]; every symbol additionally ends
//!   with [`LONG_OFF`].
//! - **Header**: [`SYNC_PULSES`] short pulses, then the remainder of [`HEADER_WAIT`].
//! - **Repeats**: frames are separated by the remainder of [`SEND_WAIT`].
//!
//! The buffer bounds at the end of this module only exist so that encoded messages fit in
//! fixed-capacity `heapless` storage. Every command in [`crate::catalog`] is within them.

/// Width of a short carrier pulse (≈ 540 µs).
///
/// Closes every symbol and makes up the sync header.
pub const SHORT_ON: f64 = 1.25864 - 1.25810;

/// Gap after every pulse (≈ 260 µs).
pub const SHORT_OFF: f64 = 1.26288 - 1.26262;

/// Width of a long carrier pulse (≈ 870 µs).
///
/// The count of long pulses before the closing short pulse is the value of a symbol.
pub const LONG_ON: f64 = 1.27339 - 1.27252;

/// Extra gap after the last pulse of a symbol (≈ 672 µs).
pub const LONG_OFF: f64 = 0.860532 - 0.85986;

/// Time from the end of the last sync pulse to the first symbol (≈ 5.09 ms).
///
/// The gap after the last sync pulse counts towards it, so only
/// `HEADER_WAIT - SHORT_OFF` is waited on top of that gap.
pub const HEADER_WAIT: f64 = 1.27250 - 1.26741;

/// Time from the end of one frame to the start of the next (≈ 25.7 ms).
///
/// As with [`HEADER_WAIT`], the trailing pulse gap is part of it.
pub const SEND_WAIT: f64 = 0.949021 - 0.923355;

/// Number of short pulses in the sync header.
pub const SYNC_PULSES: u8 = 12;

/// Number of times a frame is sent when the caller has no preference.
pub const DEFAULT_REPEAT: u8 = 3;

/// Maximum number of symbols in one command.
pub const MAX_SYMBOLS: usize = 32;

/// Maximum number of long pulses in one symbol.
pub const MAX_LONG_PULSES: usize = 15;

/// Maximum number of pulses in one encoded symbol: the long pulses plus the closing short.
pub const MAX_GROUP_LEN: usize = MAX_LONG_PULSES + 1;

/// Nanoseconds per second, for converting the constants above for `DelayNs`.
pub const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
