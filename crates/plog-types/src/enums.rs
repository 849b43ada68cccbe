//! Common enumerations used throughout plog.

use crate::errors::{PlogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum severity a logger emits.
///
/// Levels are totally ordered: `Debug < Info < Warn < Error < Fatal`. A logger
/// enabled at some level drops every record strictly below it.
///
/// Serialized in lower case. Deserialization goes through [`FromStr`], so it
/// accepts any case and the `warning` alias.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[repr(u8)]
pub enum Level {
    /// Debug messages
    Debug = 0,
    /// Informational messages
    #[default]
    Info = 1,
    /// Warnings
    Warn = 2,
    /// Errors
    Error = 3,
    /// Unrecoverable errors; the facade terminates the process after emitting
    Fatal = 4,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Upper-case name used in rendered log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Whether a record at `level` passes a logger enabled at `self`.
    pub fn permits(&self, level: Level) -> bool {
        level >= *self
    }

    /// Raw representation, for storing a level in an atomic.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`Level::as_u8`]. Out of range values saturate to `Fatal`.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

impl FromStr for Level {
    type Err = PlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(PlogError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = PlogError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
