//! Timing configuration for the transmitter.
//!
//! [`Timing`] holds the protocol durations in seconds, the way they are calibrated.
//! [`Schedule`] is the same set resolved to whole nanoseconds for
//! [`DelayNs`](embedded_hal::delay::DelayNs), with the residual header and repeat waits
//! derived from the configured values rather than stored separately.
//!
//! | Interval                  | Default   |
//! |---------------------------|-----------|
//! | short pulse               |    540 µs |
//! | long pulse                |    870 µs |
//! | gap after each pulse      |    260 µs |
//! | extra gap after a symbol  |    672 µs |
//! | header residual           |  4.83 ms  |
//! | repeat residual           | 25.41 ms  |

use libm::round;

use crate::consts::{
    HEADER_WAIT, LONG_OFF, LONG_ON, NANOS_PER_SECOND, SEND_WAIT, SHORT_OFF, SHORT_ON,
    SYNC_PULSES,
};
use crate::encoding::{Message, Pulse};
use crate::error::Error;

/// Protocol durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Width of a short pulse.
    pub short_on: f64,
    /// Gap after every pulse.
    pub short_off: f64,
    /// Width of a long pulse.
    pub long_on: f64,
    /// Extra gap after every symbol.
    pub long_off: f64,
    /// Time from the last sync pulse to the first symbol, including its gap.
    pub header_wait: f64,
    /// Time from the end of a frame to the next repeat, including the last gap.
    pub send_wait: f64,
    /// Number of short pulses in the sync header.
    pub sync_pulses: u8,
}

impl Timing {
    /// The calibrated values from [`crate::consts`].
    pub const DEFAULT: Self = Self {
        short_on: SHORT_ON,
        short_off: SHORT_OFF,
        long_on: LONG_ON,
        long_off: LONG_OFF,
        header_wait: HEADER_WAIT,
        send_wait: SEND_WAIT,
        sync_pulses: SYNC_PULSES,
    };

    /// Checks that every duration is strictly positive and that both residual waits are too.
    ///
    /// Durations must also fit a `u32` of nanoseconds, i.e. stay below ~4.29 s.
    pub fn validate(&self) -> Result<(), Error> {
        let durations = [
            self.short_on,
            self.short_off,
            self.long_on,
            self.long_off,
            self.header_wait,
            self.send_wait,
        ];
        for d in durations {
            if !(d > 0.0) {
                return Err(Error::InvalidTiming("durations must be strictly positive"));
            }
            if d * NANOS_PER_SECOND > u32::MAX as f64 {
                return Err(Error::InvalidTiming("durations must be shorter than 4.29 s"));
            }
        }
        if self.header_wait <= self.short_off {
            return Err(Error::InvalidTiming("header wait must exceed the pulse gap"));
        }
        if self.send_wait <= self.short_off {
            return Err(Error::InvalidTiming("send wait must exceed the pulse gap"));
        }
        if self.sync_pulses == 0 {
            return Err(Error::InvalidTiming("at least one sync pulse is required"));
        }
        Ok(())
    }

    /// Resolves the durations to nanoseconds, validating them first.
    pub fn schedule(&self) -> Result<Schedule, Error> {
        self.validate()?;
        Ok(Schedule {
            short_on_ns: seconds_to_ns(self.short_on),
            short_off_ns: seconds_to_ns(self.short_off),
            long_on_ns: seconds_to_ns(self.long_on),
            long_off_ns: seconds_to_ns(self.long_off),
            header_residual_ns: seconds_to_ns(self.header_wait - self.short_off),
            send_residual_ns: seconds_to_ns(self.send_wait - self.short_off),
            sync_pulses: self.sync_pulses,
        })
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Converts seconds to the nearest whole nanosecond.
///
/// # Arguments
/// - `seconds`: a duration that fits in a `u32` of nanoseconds
///
/// # Returns
/// - The rounded duration, saturating at `u32::MAX`
pub fn seconds_to_ns(seconds: f64) -> u32 {
    round(seconds * NANOS_PER_SECOND) as u32
}

/// A validated [`Timing`] in nanoseconds, ready for `DelayNs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Schedule {
    /// Width of a short pulse.
    pub short_on_ns: u32,
    /// Gap after every pulse.
    pub short_off_ns: u32,
    /// Width of a long pulse.
    pub long_on_ns: u32,
    /// Extra gap after every symbol.
    pub long_off_ns: u32,
    /// `header_wait - short_off`, waited after the last sync gap.
    pub header_residual_ns: u32,
    /// `send_wait - short_off`, waited between repeats.
    pub send_residual_ns: u32,
    /// Number of short pulses in the sync header.
    pub sync_pulses: u8,
}

impl Schedule {
    /// High time of a pulse.
    pub fn pulse_ns(&self, pulse: Pulse) -> u32 {
        match pulse {
            Pulse::Short => self.short_on_ns,
            Pulse::Long => self.long_on_ns,
        }
    }

    /// Duration of the sync header including its residual wait.
    pub fn header_ns(&self) -> u64 {
        u64::from(self.sync_pulses)
            * (u64::from(self.short_on_ns) + u64::from(self.short_off_ns))
            + u64::from(self.header_residual_ns)
    }

    /// Duration of one header plus body, without the wait before the next repeat.
    pub fn repeat_ns(&self, message: &Message) -> u64 {
        let body: u64 = message
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|&p| u64::from(self.pulse_ns(p)) + u64::from(self.short_off_ns))
                    .sum::<u64>()
                    + u64::from(self.long_off_ns)
            })
            .sum();
        self.header_ns() + body
    }

    /// Duration of a complete transmission of `repeat` frames.
    pub fn transmission_ns(&self, message: &Message, repeat: u8) -> u64 {
        if repeat == 0 {
            return 0;
        }
        u64::from(repeat) * self.repeat_ns(message)
            + u64::from(repeat - 1) * u64::from(self.send_residual_ns)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            short_on_ns: seconds_to_ns(SHORT_ON),
            short_off_ns: seconds_to_ns(SHORT_OFF),
            long_on_ns: seconds_to_ns(LONG_ON),
            long_off_ns: seconds_to_ns(LONG_OFF),
            header_residual_ns: seconds_to_ns(HEADER_WAIT - SHORT_OFF),
            send_residual_ns: seconds_to_ns(SEND_WAIT - SHORT_OFF),
            sync_pulses: SYNC_PULSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode;

    #[test]
    fn test_default_schedule_values() {
        let s = Schedule::default();
        assert_eq!(s.short_on_ns, 540_000);
        assert_eq!(s.short_off_ns, 260_000);
        assert_eq!(s.long_on_ns, 870_000);
        assert_eq!(s.long_off_ns, 672_000);
        assert_eq!(s.header_residual_ns, 4_830_000);
        assert_eq!(s.send_residual_ns, 25_406_000);
        assert_eq!(s.sync_pulses, 12);
        assert_eq!(Timing::DEFAULT.schedule(), Ok(s));
    }

    #[test]
    fn test_residuals_follow_recalibration() {
        let timing = Timing {
            short_off: 0.000_5,
            ..Timing::DEFAULT
        };
        let s = timing.schedule().unwrap();
        assert_eq!(s.header_residual_ns, 4_590_000);
        assert_eq!(s.send_residual_ns, 25_166_000);
    }

    #[test]
    fn test_validate_rejects_bad_timing() {
        let zero = Timing {
            long_on: 0.0,
            ..Timing::DEFAULT
        };
        assert!(matches!(zero.validate(), Err(Error::InvalidTiming(_))));

        let nan = Timing {
            short_on: f64::NAN,
            ..Timing::DEFAULT
        };
        assert!(matches!(nan.validate(), Err(Error::InvalidTiming(_))));

        let short_header = Timing {
            header_wait: SHORT_OFF,
            ..Timing::DEFAULT
        };
        assert!(matches!(
            short_header.schedule(),
            Err(Error::InvalidTiming(_))
        ));

        let no_sync = Timing {
            sync_pulses: 0,
            ..Timing::DEFAULT
        };
        assert!(no_sync.validate().is_err());

        let too_long = Timing {
            send_wait: 5.0,
            ..Timing::DEFAULT
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_repeat_duration_formula() {
        let s = Schedule::default();
        let header = 12 * (540_000 + 260_000) + 4_830_000;
        assert_eq!(s.header_ns(), header);

        let empty = encode(&[]).unwrap();
        assert_eq!(s.repeat_ns(&empty), header);

        // [2, 1]: three long, two short, five gaps, two symbol gaps
        let message = encode(&[2, 1]).unwrap();
        let body = 3 * 870_000 + 2 * 540_000 + 5 * 260_000 + 2 * 672_000;
        assert_eq!(s.repeat_ns(&message), header + body);
        assert_eq!(
            s.transmission_ns(&message, 3),
            3 * (header + body) + 2 * 25_406_000
        );
        assert_eq!(s.transmission_ns(&message, 0), 0);
    }

    #[test]
    fn test_long_custom_timing_does_not_overflow() {
        let timing = Timing {
            short_on: 3.0,
            short_off: 3.0,
            header_wait: 4.0,
            send_wait: 4.0,
            ..Timing::DEFAULT
        };
        let s = timing.schedule().unwrap();
        assert_eq!(s.header_ns(), 12 * 6_000_000_000 + 1_000_000_000);

        let message = encode(&[0]).unwrap();
        assert_eq!(
            s.transmission_ns(&message, 2),
            2 * (s.header_ns() + 3_000_000_000 + 3_000_000_000 + 672_000) + 1_000_000_000
        );
    }
}
