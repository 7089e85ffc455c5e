//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod method_trace;
pub mod selector;
pub mod template;

pub use appender::Appender;
pub use config::{LoggerConfig, RuleConfig, SinkSpec, Switch, DEFAULT_CONFIG_PATH};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{type_identity, Logger, LoggerBuilder};
pub use method_trace::{TraceFormat, Traced};
pub use selector::{AppenderSelector, ClassPattern, SinkKind};
pub use template::{MonikerSet, Template};
