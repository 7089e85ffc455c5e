//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// One log call as seen by every appender of a logger
///
/// The timestamp is captured once when the entry is created, so every moniker
/// expanded for this entry, in every appender, observes the same instant.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub rank: i32,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(rank: impl Into<i32>, message: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Built-in level this entry's rank floors to
    pub fn level(&self) -> LogLevel {
        LogLevel::floor(self.rank)
    }

    pub fn level_name(&self) -> &'static str {
        self.level().to_str()
    }
}
