//! Named commands understood by the fan receivers.
//!
//! Each command is the symbol sequence captured from a stock remote. Two remotes are known:
//! the downstairs remote, whose codes start `1, 3, 3, 2`, and the upstairs remote, whose
//! codes start `3, 0, 8, 0`. The first symbols identify the remote, the last few the
//! button.
//!
//! The `FAN_OFF` code and the whole upstairs family are one symbol shorter than their
//! downstairs siblings. That is how they were captured and they are kept verbatim until
//! someone re-measures them against the hardware.
//!
//! `FAN_OFF` is known not to work on the downstairs fan.

use crate::error::{CommandError, Error};

/// A named, immutable command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Upper snake case name, as used on the command line.
    pub name: &'static str,
    /// Number of long pulses for each symbol.
    pub symbols: &'static [i32],
}

impl Command {
    /// Whether this command has no body, i.e. is sent as a bare header.
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Toggles the downstairs light.
pub const LIGHT_TOGGLE: Command = Command {
    name: "LIGHT_TOGGLE",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 8,
    ],
};

/// Toggles the downstairs fan.
pub const FAN_TOGGLE: Command = Command {
    name: "FAN_TOGGLE",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 1, 0, 0, 8, 3, 0, 0,
    ],
};

/// Steps the downstairs fan speed up.
pub const FAN_UP: Command = Command {
    name: "FAN_UP",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 3, 8, 0,
    ],
};

/// Steps the downstairs fan speed down.
pub const FAN_DOWN: Command = Command {
    name: "FAN_DOWN",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 2, 7, 1,
    ],
};

/// Stops the downstairs fan. 29 symbols.
pub const FAN_OFF: Command = Command {
    name: "FAN_OFF",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 6, 3, 1,
    ],
};

/// Downstairs fan, low speed.
pub const FAN_LOW: Command = Command {
    name: "FAN_LOW",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 10, 1,
    ],
};

/// Downstairs fan, medium speed.
pub const FAN_MED: Command = Command {
    name: "FAN_MED",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 6, 5,
    ],
};

/// Downstairs fan, high speed.
pub const FAN_HIGH: Command = Command {
    name: "FAN_HIGH",
    symbols: &[
        1, 3, 3, 2, 0, 1, 4, 0, 4, 0, 3, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 5, 6,
    ],
};

/// Stops the upstairs fan.
pub const UP_FAN_OFF: Command = Command {
    name: "UP_FAN_OFF",
    symbols: &[
        3, 0, 8, 0, 1, 1, 2, 0, 1, 0, 2, 1, 2, 0, 1, 3, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 6, 3, 1,
    ],
};

/// Upstairs fan, low speed.
pub const UP_FAN_LOW: Command = Command {
    name: "UP_FAN_LOW",
    symbols: &[
        3, 0, 8, 0, 1, 1, 2, 0, 1, 0, 2, 1, 2, 0, 1, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 10, 1,
    ],
};

/// Upstairs fan, medium speed.
pub const UP_FAN_MEDIUM: Command = Command {
    name: "UP_FAN_MEDIUM",
    symbols: &[
        3, 0, 8, 0, 1, 1, 2, 0, 1, 0, 2, 1, 2, 0, 1, 3, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 6, 5,
    ],
};

/// Upstairs fan, high speed.
pub const UP_FAN_HIGH: Command = Command {
    name: "UP_FAN_HIGH",
    symbols: &[
        3, 0, 8, 0, 1, 1, 2, 0, 1, 0, 2, 1, 2, 0, 1, 3, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 5, 6,
    ],
};

/// Toggles the upstairs light.
pub const UP_LIGHT_TOGG: Command = Command {
    name: "UP_LIGHT_TOGG",
    symbols: &[
        3, 0, 8, 0, 1, 1, 2, 0, 1, 0, 2, 1, 2, 0, 1, 3, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 3, 8,
    ],
};

/// Up and down arrows held for five seconds. Reserved, header only.
pub const LIGHT_RESET: Command = Command {
    name: "LIGHT_RESET",
    symbols: &[],
};

/// Light button held. Reserved, header only.
pub const LIGHT_DIM: Command = Command {
    name: "LIGHT_DIM",
    symbols: &[],
};

/// Every known command, in declaration order.
pub const ALL: &[Command] = &[
    LIGHT_TOGGLE,
    FAN_TOGGLE,
    FAN_UP,
    FAN_DOWN,
    FAN_OFF,
    FAN_LOW,
    FAN_MED,
    FAN_HIGH,
    UP_FAN_OFF,
    UP_FAN_LOW,
    UP_FAN_MEDIUM,
    UP_FAN_HIGH,
    UP_LIGHT_TOGG,
    LIGHT_RESET,
    LIGHT_DIM,
];

/// Finds a command by name.
///
/// Matching ignores ASCII case and treats `-` like `_`, so `fan-low`, `fan_low` and
/// `FAN_LOW` all name [`FAN_LOW`].
pub fn lookup(name: &str) -> Option<&'static Command> {
    ALL.iter().find(|c| {
        c.name.len() == name.len()
            && c.name.bytes().zip(name.bytes()).all(|(a, b)| {
                let b = if b == b'-' { b'_' } else { b };
                a.eq_ignore_ascii_case(&b)
            })
    })
}

/// Fan speeds a remote can select directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FanSpeed {
    /// Fan stopped.
    Off,
    /// Lowest speed.
    Low,
    /// Middle speed.
    Medium,
    /// Highest speed.
    High,
}

impl FanSpeed {
    /// Maps a rotation speed percentage onto the three fan speeds.
    ///
    /// | Percent | Speed  |
    /// |---------|--------|
    /// | 0–1     | Off    |
    /// | 2–32    | Low    |
    /// | 33–65   | Medium |
    /// | 66–100  | High   |
    ///
    /// # Errors
    /// [`Error::InvalidCommand`] for percentages above 100.
    pub fn from_percent(percent: u8) -> Result<Self, Error> {
        match percent {
            0..=1 => Ok(Self::Off),
            2..=32 => Ok(Self::Low),
            33..=65 => Ok(Self::Medium),
            66..=100 => Ok(Self::High),
            _ => Err(CommandError::PercentOutOfRange(percent).into()),
        }
    }
}

/// The known remotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Remote {
    /// Remote paired with the downstairs fan.
    Downstairs,
    /// Remote paired with the upstairs fan.
    Upstairs,
}

impl Remote {
    /// The command that sets `speed` on this remote's fan.
    pub const fn fan(self, speed: FanSpeed) -> &'static Command {
        match (self, speed) {
            (Self::Downstairs, FanSpeed::Off) => &FAN_OFF,
            (Self::Downstairs, FanSpeed::Low) => &FAN_LOW,
            (Self::Downstairs, FanSpeed::Medium) => &FAN_MED,
            (Self::Downstairs, FanSpeed::High) => &FAN_HIGH,
            (Self::Upstairs, FanSpeed::Off) => &UP_FAN_OFF,
            (Self::Upstairs, FanSpeed::Low) => &UP_FAN_LOW,
            (Self::Upstairs, FanSpeed::Medium) => &UP_FAN_MEDIUM,
            (Self::Upstairs, FanSpeed::High) => &UP_FAN_HIGH,
        }
    }

    /// The command that toggles this remote's light.
    pub const fn light_toggle(self) -> &'static Command {
        match self {
            Self::Downstairs => &LIGHT_TOGGLE,
            Self::Upstairs => &UP_LIGHT_TOGG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding;

    #[test]
    fn test_catalog_commands_are_valid() {
        for command in ALL {
            assert!(
                encoding::validate(command.symbols).is_ok(),
                "{}",
                command.name
            );
        }
    }

    #[test]
    fn test_catalog_bodies_are_distinct() {
        let bodies: Vec<&Command> = ALL.iter().filter(|c| !c.is_empty()).collect();
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                assert_ne!(a.symbols, b.symbols, "{} == {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            assert!(ALL[i + 1..].iter().all(|b| b.name != a.name));
        }
    }

    #[test]
    fn test_captured_lengths_kept() {
        assert_eq!(FAN_LOW.symbols.len(), 30);
        assert_eq!(FAN_OFF.symbols.len(), 29);
        assert_eq!(UP_FAN_LOW.symbols.len(), 29);
        assert_eq!(UP_LIGHT_TOGG.symbols.len(), 29);
        assert!(LIGHT_RESET.is_empty());
        assert!(LIGHT_DIM.is_empty());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("FAN_LOW"), Some(&FAN_LOW));
        assert_eq!(lookup("fan-low"), Some(&FAN_LOW));
        assert_eq!(lookup("Up_Light_Togg"), Some(&UP_LIGHT_TOGG));
        assert_eq!(lookup("fan"), None);
        assert_eq!(lookup("fan_lowest"), None);
    }

    #[test]
    fn test_fan_speed_from_percent() {
        assert_eq!(FanSpeed::from_percent(0), Ok(FanSpeed::Off));
        assert_eq!(FanSpeed::from_percent(1), Ok(FanSpeed::Off));
        assert_eq!(FanSpeed::from_percent(2), Ok(FanSpeed::Low));
        assert_eq!(FanSpeed::from_percent(33), Ok(FanSpeed::Medium));
        assert_eq!(FanSpeed::from_percent(65), Ok(FanSpeed::Medium));
        assert_eq!(FanSpeed::from_percent(66), Ok(FanSpeed::High));
        assert_eq!(FanSpeed::from_percent(100), Ok(FanSpeed::High));
        assert!(FanSpeed::from_percent(101).is_err());
    }

    #[test]
    fn test_remote_families() {
        assert_eq!(Remote::Downstairs.fan(FanSpeed::Medium), &FAN_MED);
        assert_eq!(Remote::Upstairs.fan(FanSpeed::Off), &UP_FAN_OFF);
        assert_eq!(Remote::Upstairs.light_toggle(), &UP_LIGHT_TOGG);
        for speed in [FanSpeed::Off, FanSpeed::Low, FanSpeed::Medium, FanSpeed::High] {
            assert_eq!(Remote::Downstairs.fan(speed).symbols[..4], [1, 3, 3, 2]);
            assert_eq!(Remote::Upstairs.fan(speed).symbols[..4], [3, 0, 8, 0]);
        }
    }
}
