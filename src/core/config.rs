//! Configuration document consumed by the appender selector
//!
//! The document is a JSON object with a `LoggerConfig` array of rules:
//!
//! ```json
//! {
//!   "LoggerConfig": [
//!     {
//!       "ClassNamePattern": "App.*",
//!       "StopScanning": "true",
//!       "DefaultLoggingLevel": "Info",
//!       "Loggers": [
//!         { "Type": "Console", "LogLinePrefix": "[{L}] " },
//!         { "Type": "File", "FilePath": "logs/app-{y}{M}{d}.log", "MaxFileDays": 7 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! The value is loaded once at startup and passed by reference to every
//! [`Logger`](crate::core::Logger) constructor.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File read by [`LoggerConfig::load_default`], relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "logger_config.json";

/// Root of the configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Rules in document order; `null` entries are kept so positions match the file
    #[serde(rename = "LoggerConfig", default)]
    pub rules: Vec<Option<RuleConfig>>,
}

/// One pattern-to-sinks rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleConfig {
    #[serde(default)]
    pub class_name_pattern: Option<String>,
    #[serde(default)]
    pub stop_scanning: Option<Switch>,
    #[serde(default)]
    pub default_logging_level: Option<String>,
    #[serde(default)]
    pub loggers: Option<Vec<Option<SinkSpec>>>,
}

/// One sink entry of a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SinkSpec {
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub logging_level: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub log_line_prefix: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub max_file_days: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub use_colors: Option<bool>,
}

/// Boolean flag written either as a JSON bool or as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Switch {
    Bool(bool),
    Text(String),
}

impl Switch {
    pub fn is_on(&self) -> bool {
        match self {
            Switch::Bool(value) => *value,
            Switch::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

impl LoggerConfig {
    /// Parse a configuration document from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoad` if the text is not a valid document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config_load("<inline>", e.to_string()))
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoad` if the file is missing, unreadable or malformed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let text = fs::read_to_string(path)
            .map_err(|e| LoggerError::config_load(display.clone(), e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| LoggerError::config_load(display, e.to_string()))
    }

    /// Read [`DEFAULT_CONFIG_PATH`] from the working directory
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Rules that are present, in document order
    pub fn rules(&self) -> impl Iterator<Item = &RuleConfig> {
        self.rules.iter().flatten()
    }

    #[must_use]
    pub fn with_rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(Some(rule));
        self
    }
}

impl RuleConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            class_name_pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stop_scanning(mut self, stop: bool) -> Self {
        self.stop_scanning = Some(Switch::Bool(stop));
        self
    }

    #[must_use]
    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.default_logging_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: SinkSpec) -> Self {
        self.loggers.get_or_insert_with(Vec::new).push(Some(sink));
        self
    }

    /// Pattern if present and non-empty
    pub fn pattern(&self) -> Option<&str> {
        self.class_name_pattern.as_deref().filter(|p| !p.is_empty())
    }

    pub fn stops_scanning(&self) -> bool {
        self.stop_scanning.as_ref().is_some_and(Switch::is_on)
    }

    /// Threshold inherited by sinks that do not override it
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeverityName` if the level is not recognized
    pub fn default_level(&self) -> Result<LogLevel> {
        match self.default_logging_level.as_deref() {
            Some(name) => name.parse(),
            None => Ok(LogLevel::default()),
        }
    }

    /// Sink entries that are present, in document order
    pub fn sinks(&self) -> impl Iterator<Item = &SinkSpec> {
        self.loggers.iter().flatten().flatten()
    }
}

impl SinkSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn console() -> Self {
        Self::new("Console")
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::new("File")
        }
    }

    pub fn event_log() -> Self {
        Self::new("EventViewer")
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.logging_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_line_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_max_file_days(mut self, days: i64) -> Self {
        self.max_file_days = Some(days);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Own override if present, else the rule's default
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeverityName` if the override is not recognized
    pub fn threshold(&self, default: LogLevel) -> Result<LogLevel> {
        match self.logging_level.as_deref() {
            Some(name) => name.parse(),
            None => Ok(default),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Logger")
    }
}
