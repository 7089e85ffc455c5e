//! Event log appender
//!
//! Forwards messages to a platform event log under a source name, with the
//! event category derived from the message severity. The platform write itself
//! sits behind [`EventWriter`]; the bundled [`StderrEventWriter`] prints events
//! to standard error.

use crate::core::{Appender, LogEntry, LogLevel, Result};
use std::fmt;
use std::io::Write;

/// Category of an event log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Information,
    Warning,
    Error,
}

impl EventCategory {
    /// Category for the built-in level a message floors to
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace
            | LogLevel::Debug
            | LogLevel::Verbose
            | LogLevel::Info
            | LogLevel::Force => EventCategory::Information,
            LogLevel::Warning => EventCategory::Warning,
            LogLevel::Error | LogLevel::Fatal | LogLevel::None => EventCategory::Error,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            EventCategory::Information => "Information",
            EventCategory::Warning => "Warning",
            EventCategory::Error => "Error",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Destination for event records
pub trait EventWriter: Send + Sync {
    fn write_event(&mut self, source: &str, category: EventCategory, message: &str) -> Result<()>;
}

/// Writes `[source] Category: message` lines to standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrEventWriter;

impl EventWriter for StderrEventWriter {
    fn write_event(&mut self, source: &str, category: EventCategory, message: &str) -> Result<()> {
        writeln!(std::io::stderr().lock(), "[{}] {}: {}", source, category, message)?;
        Ok(())
    }
}

pub struct EventLogAppender {
    threshold: LogLevel,
    name: String,
    source: String,
    writer: Box<dyn EventWriter>,
}

impl EventLogAppender {
    pub fn new(source: impl Into<String>, threshold: LogLevel) -> Self {
        Self {
            threshold,
            name: "Logger".to_string(),
            source: source.into(),
            writer: Box::new(StderrEventWriter),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_writer<W: EventWriter + 'static>(mut self, writer: W) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Appender for EventLogAppender {
    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let category = EventCategory::for_level(entry.level());
        self.writer.write_event(&self.source, category, &entry.message)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
