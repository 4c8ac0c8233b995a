//! Control commands and their text form
//!
//! The text form is the line protocol spoken by the host controller:
//!
//! | Line       | Command                        |
//! |------------|--------------------------------|
//! | `f,<n>`    | ramp the control value to `n`  |
//! | `b,<n>`    | retreat: ramp to `100 - n`     |
//! | `s`        | toggle pause                   |
//! | `q`/`quit` | blackout and reset to 0        |

use core::fmt;

use crate::control::{CONTROL_MAX, clamp_control};

/// A validated control command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Ramp the control value to the given target (clamped to 0-100)
    SetTarget(f32),
    /// Retreat by the given amount: the target becomes `100 - n`
    Retreat(f32),
    /// Pause or resume the wave domain
    TogglePause,
    /// Drop everything to 0 and blank the strips
    Quit,
}

/// Reasons a command line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line was blank
    Empty,
    /// Line did not match any command
    Unknown,
    /// A value command had a missing or non-numeric argument
    MalformedValue,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown => write!(f, "unrecognized command"),
            CommandError::MalformedValue => write!(f, "expected a number, e.g. f,50"),
        }
    }
}

impl core::error::Error for CommandError {}

impl Command {
    /// Parse one command line
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Numbers outside 0-100 are clamped, not rejected.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        if line.eq_ignore_ascii_case("s") {
            return Ok(Self::TogglePause);
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(Self::Quit);
        }

        let Some((name, value)) = line.split_once(',') else {
            return Err(CommandError::Unknown);
        };
        let name = name.trim();
        let build: fn(f32) -> Self = if name.eq_ignore_ascii_case("f") {
            Self::SetTarget
        } else if name.eq_ignore_ascii_case("b") {
            Self::Retreat
        } else {
            return Err(CommandError::Unknown);
        };

        let value: f32 = value
            .trim()
            .parse()
            .map_err(|_| CommandError::MalformedValue)?;
        if value.is_nan() {
            return Err(CommandError::MalformedValue);
        }
        Ok(build(clamp_control(value)))
    }

    /// Control target requested by a value command
    pub fn target(self) -> Option<f32> {
        match self {
            Self::SetTarget(n) => Some(clamp_control(n)),
            Self::Retreat(n) => Some(CONTROL_MAX - clamp_control(n)),
            Self::TogglePause | Self::Quit => None,
        }
    }
}

impl core::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
