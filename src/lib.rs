//! # Rust Leveled Logger
//!
//! A leveled logging library where each component gets its own logger,
//! configured from a JSON document that maps component-name patterns to
//! output sinks.
//!
//! ## Features
//!
//! - **Numeric Severities**: Built-in levels plus arbitrary custom ranks
//! - **Pattern Rules**: Wildcard class-name patterns select sinks per component
//! - **Multiple Sinks**: Console, date-templated files with retention, and event log
//! - **Templates**: `{x}` monikers for timestamps and severity in prefixes and file names
//! - **Method Tracing**: Entry, exit, and error tracing with captured function names
//!
//! ## Example
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//!
//! let config = LoggerConfig::default().with_rule(
//!     RuleConfig::new("Billing.*")
//!         .with_default_level("Info")
//!         .with_sink(SinkSpec::console().with_prefix("{T} [{L}] ")),
//! );
//!
//! let logger = Logger::new("Billing.Invoices", &config)?;
//! logger.info("invoice run started");
//! logger.debug("filtered out by the Info threshold");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, EventLogAppender, FileAppender};
    pub use crate::core::{
        Appender, AppenderSelector, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, Result, RuleConfig, SinkSpec, TraceFormat, Traced,
    };
}

pub use appenders::{ConsoleAppender, EventLogAppender, FileAppender};
pub use core::{
    Appender, AppenderSelector, ClassPattern, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, Result, RuleConfig, SinkKind, SinkSpec, Template, TraceFormat,
    Traced,
};
