//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result, Template};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Writer shared between an appender and whoever reads what it wrote
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Writes `prefix + message` lines to standard output
///
/// # Example
///
/// ```
/// use rust_leveled_logger::appenders::ConsoleAppender;
/// use rust_leveled_logger::LogLevel;
///
/// let appender = ConsoleAppender::new(LogLevel::Info).with_prefix("{T} [{L}] ");
/// ```
pub struct ConsoleAppender {
    threshold: LogLevel,
    name: String,
    prefix: Template,
    use_colors: bool,
    stream: Option<SharedWriter>,
}

impl ConsoleAppender {
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            name: "Logger".to_string(),
            prefix: Template::line(""),
            use_colors: false,
            stream: None,
        }
    }

    /// Set the line prefix template
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Template::line(prefix);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Colour whole lines by severity
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Write to `stream` instead of standard output
    #[must_use]
    pub fn with_stream(mut self, stream: SharedWriter) -> Self {
        self.stream = Some(stream);
        self
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        let line = format!(
            "{}{}",
            self.prefix.expand_at(&entry.timestamp, Some(entry.level_name())),
            entry.message
        );

        if self.use_colors {
            line.color(entry.level().color_code()).to_string()
        } else {
            line
        }
    }
}

impl Appender for ConsoleAppender {
    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format_line(entry);

        // Console output is best effort
        match &self.stream {
            Some(stream) => {
                let _ = writeln!(stream.lock(), "{}", line);
            }
            None => {
                let _ = writeln!(std::io::stdout().lock(), "{}", line);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &self.stream {
            Some(stream) => stream.lock().flush()?,
            None => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
