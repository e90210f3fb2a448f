//! Host delay provider.
//!
//! Scheduler sleeps on a general purpose OS routinely overshoot by a millisecond or more,
//! which is longer than any pulse in the protocol. [`SpinDelay`] uses `spin_sleep`, which
//! sleeps natively for the bulk of the interval and spins for the last stretch.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use spin_sleep::SpinSleeper;

/// A [`DelayNs`] implementation for hosted targets such as a Raspberry Pi.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    sleeper: SpinSleeper,
}

impl SpinDelay {
    /// Creates a delay that spins for the final `native_accuracy_ns` of every wait.
    ///
    /// Raise it on hosts with a coarse scheduler tick.
    pub fn new(native_accuracy_ns: u32) -> Self {
        Self {
            sleeper: SpinSleeper::new(native_accuracy_ns),
        }
    }

    /// A delay that busy-waits for every interval.
    ///
    /// Most accurate, and keeps one core busy for the whole transmission.
    pub fn spin_only() -> Self {
        Self::new(u32::MAX)
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self {
            sleeper: SpinSleeper::default(),
        }
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        if ns == 0 {
            return;
        }
        self.sleeper.sleep(Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_spin_delay_waits_at_least() {
        let mut delay = SpinDelay::default();
        let start = Instant::now();
        delay.delay_us(540);
        assert!(Duration::from_micros(540) <= start.elapsed());

        let start = Instant::now();
        delay.delay_ns(0);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_spin_only_waits_at_least() {
        let mut delay = SpinDelay::spin_only();
        let start = Instant::now();
        delay.delay_ms(2);
        assert!(Duration::from_millis(2) <= start.elapsed());
    }
}
