//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Configuration document could not be read or parsed
    #[error("Configuration file '{path}' cannot be loaded: {message}")]
    ConfigLoad { path: String, message: String },

    /// Severity name not present in the alias table
    #[error("The provided logging level '{name}' is not recognized")]
    InvalidSeverityName { name: String },

    /// Sink type tag not present in the synonym table
    #[error("The provided logger type '{kind}' is not recognized")]
    InvalidSinkType { kind: String },

    /// Required sink setting absent
    #[error("The configuration field '{setting}' is required for {sink} loggers")]
    MissingConfiguration { sink: String, setting: String },

    /// Class name pattern that cannot be compiled
    #[error("Invalid class name pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Retention sweep gave up on a file
    #[error("Failed to delete expired log file '{path}' after {attempts} attempts")]
    RetentionSweep {
        path: String,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a configuration load error
    pub fn config_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_severity(name: impl Into<String>) -> Self {
        LoggerError::InvalidSeverityName { name: name.into() }
    }

    pub fn invalid_sink_type(kind: impl Into<String>) -> Self {
        LoggerError::InvalidSinkType { kind: kind.into() }
    }

    /// Create a missing configuration error for a sink kind
    pub fn missing_configuration(sink: impl Into<String>, setting: impl Into<String>) -> Self {
        LoggerError::MissingConfiguration {
            sink: sink.into(),
            setting: setting.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a retention sweep error for the file that could not be removed
    pub fn retention_sweep(path: impl Into<String>, attempts: u32, source: std::io::Error) -> Self {
        LoggerError::RetentionSweep {
            path: path.into(),
            attempts,
            source,
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Whether the error comes from the configuration document rather than runtime I/O
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LoggerError::ConfigLoad { .. }
                | LoggerError::InvalidSeverityName { .. }
                | LoggerError::InvalidSinkType { .. }
                | LoggerError::MissingConfiguration { .. }
                | LoggerError::InvalidPattern { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_severity("LOUD");
        assert!(matches!(err, LoggerError::InvalidSeverityName { .. }));

        let err = LoggerError::invalid_sink_type("Carrier");
        assert!(matches!(err, LoggerError::InvalidSinkType { .. }));

        let err = LoggerError::missing_configuration("File", "FilePath");
        assert!(matches!(err, LoggerError::MissingConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_severity("LOUD");
        assert_eq!(
            err.to_string(),
            "The provided logging level 'LOUD' is not recognized"
        );

        let err = LoggerError::missing_configuration("File", "FilePath");
        assert_eq!(
            err.to_string(),
            "The configuration field 'FilePath' is required for File loggers"
        );

        let err = LoggerError::config_load("./logger_config.json", "file not found");
        assert_eq!(
            err.to_string(),
            "Configuration file './logger_config.json' cannot be loaded: file not found"
        );
    }

    #[test]
    fn test_retention_error_keeps_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "in use");
        let err = LoggerError::retention_sweep("/var/log/app.log", 10, io_err);

        assert!(err.to_string().contains("after 10 attempts"));
        assert!(err.source().is_some());
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(LoggerError::invalid_sink_type("x").is_configuration_error());
        assert!(LoggerError::invalid_pattern("[", "bad").is_configuration_error());
        assert!(LoggerError::config_load("<inline>", "eof").is_configuration_error());
        assert!(!LoggerError::from(std::io::Error::new(std::io::ErrorKind::Other, "x"))
            .is_configuration_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = LoggerError::io_operation("writing log file", "cannot write", io_err);
        assert!(!err.is_configuration_error());
        assert!(err.to_string().contains("writing log file"));
    }
}
