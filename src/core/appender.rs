//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};

/// A single configured output destination
///
/// Each appender owns its threshold. [`Appender::emit`] is what the logger
/// calls for every log call; it filters by threshold and only then hands the
/// entry to [`Appender::append`], which formats and writes it.
pub trait Appender: Send + Sync {
    /// Minimum level this appender admits
    fn threshold(&self) -> LogLevel;

    /// Write an entry that already passed the threshold
    fn append(&mut self, entry: &LogEntry) -> Result<()>;

    fn name(&self) -> &str;

    fn accepts(&self, rank: i32) -> bool {
        self.threshold().admits(rank)
    }

    /// Filter by threshold, then append
    fn emit(&mut self, entry: &LogEntry) -> Result<()> {
        if !self.accepts(entry.rank) {
            return Ok(());
        }
        self.append(entry)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
