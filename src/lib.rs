//! # fan433
//!
//! A portable, no_std Rust transmitter for the pulse-width coded 433 MHz remotes that ship
//! with ceiling fans, compatible with cheap OOK modules like the FS1000A.
//!
//! The protocol has no bytes, no checksum and no acknowledgement. A command is a list of
//! small integers, and each integer is sent as that many long carrier pulses followed by one
//! short pulse. A fixed train of sync pulses precedes every command, and the whole frame is
//! repeated a few times so that a receiver on a lossy channel catches at least one copy.
//!
//! This crate implements the transmit side of that protocol using:
//! - `embedded-hal` traits for digital I/O and timing
//! - a pure encoder from command symbols to pulse groups
//! - a blocking transmitter that bit-bangs the frame with a `DelayNs` provider
//! - an optional interrupt-safe global transmitter with `critical-section`
//!
//! ## Crate features
//! | Feature            | Description |
//! |--------------------|-------------|
//! | `std`              | Disables `#![no_std]`, replaces `heapless::Vec`s with `std::vec::Vec`s and adds a `spin_sleep` backed delay |
//! | `shared` (default) | Global transmitter slot guarded by `critical_section::with` |
//! | `defmt-0-3`        | Uses `defmt` logging |
//! | `log`              | Uses `log` logging |
//! | `cli`              | Builds the `fan433` command-line tool |
//!
//! ## Usage
//!
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State, Transaction};
//! # let mut expected = vec![Transaction::set(State::Low)];
//! # for _ in 0..fan433::consts::SYNC_PULSES {
//! #     expected.push(Transaction::set(State::High));
//! #     expected.push(Transaction::set(State::Low));
//! # }
//! # expected.push(Transaction::set(State::Low));
//! # let tx_pin = Pin::new(&expected);
//! use fan433::{catalog, pin::HalPin, transmitter::Transmitter};
//!
//! let mut transmitter = Transmitter::new(HalPin::new(tx_pin), NoopDelay::new());
//!
//! // A hold-button gesture has no body: one header, sent once
//! let report = transmitter.transmit(catalog::LIGHT_DIM.symbols, 1)?;
//! assert_eq!(report.repeats_sent, 1);
//! # let (pin, _) = transmitter.into_parts();
//! # pin.into_inner().done();
//! # Ok::<(), fan433::Error>(())
//! ```
//!
//! ## Integration Notes
//!
//! - Pulse widths are a few hundred microseconds; a jitter of a few hundred microseconds is
//!   enough for the receiver to drop the frame
//! - Prefer a busy-wait delay over a scheduler sleep on hosted targets
//! - Only one transmitter should own the TX pin at a time
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "shared")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

#[macro_use]
pub(crate) mod log;

pub mod catalog;
pub mod consts;
#[cfg(feature = "std")]
pub mod delay;
pub mod encoding;
pub mod error;
pub mod pin;
#[cfg(feature = "shared")]
pub mod shared;
pub mod timing;
pub mod transmitter;

pub use error::Error;
