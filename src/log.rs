//! Logging shims.
//!
//! Forwards to `log` or `defmt` depending on the enabled feature. With neither feature the
//! arguments are still type-checked but nothing is emitted. Only `{}` and `{:?}` placeholders
//! are portable across both backends.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
        #[cfg(feature = "defmt-0-3")]
        ::defmt::trace!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = format_args!($($arg)+);
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
        #[cfg(feature = "defmt-0-3")]
        ::defmt::debug!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = format_args!($($arg)+);
    }};
}

macro_rules! info {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::info!($($arg)+);
        #[cfg(feature = "defmt-0-3")]
        ::defmt::info!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = format_args!($($arg)+);
    }};
}

macro_rules! warn_ {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
        #[cfg(feature = "defmt-0-3")]
        ::defmt::warn!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = format_args!($($arg)+);
    }};
}

macro_rules! error {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::error!($($arg)+);
        #[cfg(feature = "defmt-0-3")]
        ::defmt::error!($($arg)+);
        #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
        let _ = format_args!($($arg)+);
    }};
}
