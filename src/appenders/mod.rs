//! Appender implementations

pub mod console;
pub mod event_log;
pub mod file;
pub mod retention;

pub use console::{ConsoleAppender, SharedWriter};
pub use event_log::{EventCategory, EventLogAppender, EventWriter, StderrEventWriter};
pub use file::FileAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
