//! Log level definitions
//!
//! Levels are ordered integer ranks. Application code may log at any `i32`
//! rank; the display name of an arbitrary rank is the name of the highest
//! built-in level at or below it.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(i32)]
pub enum LogLevel {
    Trace = i32::MIN,
    Debug = 0,
    Verbose = 4,
    Info = 16,
    Warning = 64,
    /// Threshold used when a rule names no default level
    #[default]
    Error = 256,
    Fatal = 1024,
    /// Threshold only: suppresses everything except forced messages
    None = 4096,
    /// Always passes any threshold
    Force = i32::MAX,
}

impl LogLevel {
    /// Every built-in level, lowest rank first
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Verbose,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::None,
        LogLevel::Force,
    ];

    #[inline]
    pub const fn rank(self) -> i32 {
        self as i32
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERB",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::None => "NONE",
            LogLevel::Force => "FORCE",
        }
    }

    /// Single-letter code accepted by the parser; Force has none
    pub fn code(&self) -> Option<&'static str> {
        match self {
            LogLevel::Trace => Some("T"),
            LogLevel::Debug => Some("D"),
            LogLevel::Verbose => Some("V"),
            LogLevel::Info => Some("I"),
            LogLevel::Warning => Some("W"),
            LogLevel::Error => Some("E"),
            LogLevel::Fatal => Some("F"),
            LogLevel::None => Some("N"),
            LogLevel::Force => None,
        }
    }

    /// Highest built-in level whose rank is at or below `rank`
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_leveled_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::floor(16), LogLevel::Info);
    /// assert_eq!(LogLevel::floor(100), LogLevel::Warning);
    /// assert_eq!(LogLevel::floor(-5), LogLevel::Trace);
    /// ```
    pub fn floor(rank: i32) -> LogLevel {
        Self::ALL
            .iter()
            .rev()
            .find(|level| level.rank() <= rank)
            .copied()
            .unwrap_or(LogLevel::Trace)
    }

    /// Display name for an arbitrary rank
    pub fn name_of(rank: i32) -> &'static str {
        Self::floor(rank).to_str()
    }

    /// Rank for a severity name or alias
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeverityName` when the name is not recognized
    pub fn rank_of(name: &str) -> Result<i32> {
        name.parse::<LogLevel>().map(LogLevel::rank)
    }

    /// Whether a message at `rank` passes this level used as a threshold
    #[inline]
    pub fn admits(self, rank: i32) -> bool {
        rank >= self.rank()
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Verbose => Cyan,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal | LogLevel::None => BrightRed,
            LogLevel::Force => Magenta,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" | "ALL" | "T" | "TRACE" => Ok(LogLevel::Trace),
            "V" | "VERB" | "VERBOSE" => Ok(LogLevel::Verbose),
            "D" | "DEBUG" => Ok(LogLevel::Debug),
            "I" | "INFO" | "INFORMATION" => Ok(LogLevel::Info),
            "W" | "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "E" | "ERR" | "ERROR" => Ok(LogLevel::Error),
            "F" | "FATAL" => Ok(LogLevel::Fatal),
            "N" | "NONE" => Ok(LogLevel::None),
            "FORCE" => Ok(LogLevel::Force),
            _ => Err(LoggerError::invalid_severity(s)),
        }
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> i32 {
        level.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks() {
        assert_eq!(LogLevel::Trace.rank(), i32::MIN);
        assert_eq!(LogLevel::Debug.rank(), 0);
        assert_eq!(LogLevel::Verbose.rank(), 4);
        assert_eq!(LogLevel::Info.rank(), 16);
        assert_eq!(LogLevel::Warning.rank(), 64);
        assert_eq!(LogLevel::Error.rank(), 256);
        assert_eq!(LogLevel::Fatal.rank(), 1024);
        assert_eq!(LogLevel::None.rank(), 4096);
        assert_eq!(LogLevel::Force.rank(), i32::MAX);
    }

    #[test]
    fn test_aliases() {
        for alias in ["a", "ALL", "t", "Trace"] {
            assert_eq!(alias.parse::<LogLevel>().unwrap(), LogLevel::Trace);
        }
        for alias in ["i", "info", "Information"] {
            assert_eq!(alias.parse::<LogLevel>().unwrap(), LogLevel::Info);
        }
        for alias in ["w", "warn", "WARNING"] {
            assert_eq!(alias.parse::<LogLevel>().unwrap(), LogLevel::Warning);
        }
        for alias in ["e", "err", "Error"] {
            assert_eq!(alias.parse::<LogLevel>().unwrap(), LogLevel::Error);
        }
        assert_eq!("n".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
    }

    #[test]
    fn test_force_parses_by_name_only() {
        assert_eq!("force".parse::<LogLevel>().unwrap(), LogLevel::Force);
        assert!("x".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Force.code(), None);
        assert_eq!(LogLevel::Fatal.code(), Some("F"));
    }

    #[test]
    fn test_unknown_name() {
        let err = LogLevel::rank_of("LOUD").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidSeverityName { ref name } if name == "LOUD"));
    }

    #[test]
    fn test_floor_lookup() {
        assert_eq!(LogLevel::name_of(i32::MIN), "TRACE");
        assert_eq!(LogLevel::name_of(-1), "TRACE");
        assert_eq!(LogLevel::name_of(0), "DEBUG");
        assert_eq!(LogLevel::name_of(3), "DEBUG");
        assert_eq!(LogLevel::name_of(4), "VERB");
        assert_eq!(LogLevel::name_of(20), "INFO");
        assert_eq!(LogLevel::name_of(255), "WARN");
        assert_eq!(LogLevel::name_of(256), "ERROR");
        assert_eq!(LogLevel::name_of(2000), "FATAL");
        assert_eq!(LogLevel::name_of(5000), "NONE");
        assert_eq!(LogLevel::name_of(i32::MAX - 1), "NONE");
        assert_eq!(LogLevel::name_of(i32::MAX), "FORCE");
    }

    #[test]
    fn test_force_admitted_by_every_threshold() {
        for threshold in LogLevel::ALL {
            assert!(threshold.admits(LogLevel::Force.rank()));
        }
        assert!(!LogLevel::None.admits(LogLevel::Fatal.rank()));
    }

    #[test]
    fn test_all_is_sorted() {
        assert!(LogLevel::ALL.windows(2).all(|w| w[0] < w[1] && w[0].rank() < w[1].rank()));
    }
}
