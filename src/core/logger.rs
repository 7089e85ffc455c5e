//! Main logger implementation
//!
//! A [`Logger`] is the per-component entry point. It is built once for a
//! component identity, resolves its appenders from the configuration document
//! at that moment, and then forwards every log call to each of them in order.
//! The logger never filters by severity itself; each appender applies its own
//! threshold.

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::Result,
    log_entry::LogEntry,
    log_level::LogLevel,
    method_trace::{self, TraceFormat},
    selector::AppenderSelector,
};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;

pub struct Logger {
    identity: String,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
}

impl Logger {
    /// Build the logger for a component identity from a configuration document
    ///
    /// # Errors
    ///
    /// Returns the first configuration error met while building the appenders
    /// of the rules that match `identity`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_leveled_logger::prelude::*;
    ///
    /// let config = LoggerConfig::from_json(r#"{
    ///     "LoggerConfig": [
    ///         { "ClassNamePattern": "App.*", "DefaultLoggingLevel": "Info",
    ///           "Loggers": [ { "Type": "Console", "LogLinePrefix": "[{L}] " } ] }
    ///     ]
    /// }"#)?;
    ///
    /// let logger = Logger::new("App.Worker", &config)?;
    /// logger.info("ready");
    /// # Ok::<(), LoggerError>(())
    /// ```
    pub fn new(identity: impl Into<String>, config: &LoggerConfig) -> Result<Self> {
        Self::with_selector(identity, &AppenderSelector::new(config))
    }

    /// Build the logger for the type `T`
    ///
    /// The identity is the type's path with `::` written as `.`, so
    /// `my_app::worker::Worker` is matched as `my_app.worker.Worker`.
    pub fn for_type<T: ?Sized>(config: &LoggerConfig) -> Result<Self> {
        Self::new(type_identity::<T>(), config)
    }

    /// Build the logger with an explicitly prepared selector
    pub fn with_selector(identity: impl Into<String>, selector: &AppenderSelector<'_>) -> Result<Self> {
        let identity = identity.into();
        let appenders = selector.resolve(&identity)?;
        Ok(Self::from_appenders(identity, appenders))
    }

    pub fn from_appenders(identity: impl Into<String>, appenders: Vec<Box<dyn Appender>>) -> Self {
        Self {
            identity: identity.into(),
            appenders: Mutex::new(appenders),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.lock().len()
    }

    /// Forward one message at `rank` to every appender, in order
    pub fn log(&self, rank: impl Into<i32>, message: impl fmt::Display) {
        let entry = LogEntry::new(rank, message.to_string());
        let mut appenders = self.appenders.lock();
        Self::dispatch(&mut appenders, &entry);
    }

    /// Emit to each appender with per-appender panic isolation
    ///
    /// A failing or panicking appender is reported on stderr; the remaining
    /// appenders still receive the entry.
    fn dispatch(appenders: &mut [Box<dyn Appender>], entry: &LogEntry) {
        for (idx, appender) in appenders.iter_mut().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.emit(entry)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                }
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn verbose(&self, message: impl fmt::Display) {
        self.log(LogLevel::Verbose, message);
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
    }

    /// Log at an arbitrary numeric rank
    #[inline]
    pub fn custom(&self, message: impl fmt::Display, rank: i32) {
        self.log(rank, message);
    }

    /// Log at the Force rank, which passes every threshold
    #[inline]
    pub fn force(&self, message: impl fmt::Display) {
        self.log(LogLevel::Force, message);
    }

    /// Log a message and then the error with its whole cause chain, at Error
    pub fn error_with(&self, message: impl fmt::Display, error: &(dyn Error + 'static)) {
        self.log_with_cause(LogLevel::Error, message, error);
    }

    /// Log a message and then the error with its whole cause chain, at Fatal
    pub fn fatal_with(&self, message: impl fmt::Display, error: &(dyn Error + 'static)) {
        self.log_with_cause(LogLevel::Fatal, message, error);
    }

    fn log_with_cause(&self, level: LogLevel, message: impl fmt::Display, error: &(dyn Error + 'static)) {
        let mut appenders = self.appenders.lock();
        let mut emit = |text: String| Self::dispatch(&mut appenders, &LogEntry::new(level, text));

        emit(message.to_string());
        emit(error.to_string());

        let mut cause = error.source();
        while let Some(inner) = cause {
            emit("Inner Exception:".to_string());
            emit(inner.to_string());
            cause = inner.source();
        }
    }

    /// Trace entry into `method` with its arguments
    ///
    /// Wrap a `Display` value without a [`TraceFormat`] rendering in
    /// [`Traced`](crate::Traced). See [`log_method_start!`](crate::log_method_start) for capturing the
    /// method name automatically.
    pub fn method_start(&self, method: &str, args: &[&dyn TraceFormat]) {
        self.trace(method_trace::start_message(method, args));
    }

    pub fn method_end(&self, method: &str) {
        self.trace(method_trace::end_message(method));
    }

    /// Trace exit from `method` and hand `value` back unchanged
    ///
    /// # Example
    ///
    /// ```
    /// use rust_leveled_logger::prelude::*;
    ///
    /// let logger = Logger::from_appenders("Calc", Vec::new());
    /// assert_eq!(logger.method_end_with("Calc::double", 21 * 2), 42);
    /// ```
    pub fn method_end_with<T: TraceFormat>(&self, method: &str, value: T) -> T {
        self.trace(method_trace::end_with_value_message(method, &value));
        value
    }

    pub fn error_in_method(&self, method: &str, error: &(dyn Error + 'static)) {
        self.error_with(format!("Error thrown in {}", method), error);
    }

    /// Log `name = value` at Debug
    pub fn variable_value(&self, name: &str, value: impl fmt::Display) {
        self.debug(format!("{} = {}", name, value));
    }

    /// Log the time since `start` at Info
    pub fn time_elapsed(&self, start: DateTime<Local>) {
        let elapsed = Local::now().signed_duration_since(start);
        self.info(format!("Time elapsed: {}", method_trace::format_elapsed(elapsed)));
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let appenders = self.appenders.lock();
        let names: Vec<&str> = appenders.iter().map(|a| a.name()).collect();
        f.debug_struct("Logger")
            .field("identity", &self.identity)
            .field("appenders", &names)
            .finish()
    }
}

/// Dotted identity for a type, e.g. `my_app.worker.Worker`
pub fn type_identity<T: ?Sized>() -> String {
    std::any::type_name::<T>().replace("::", ".")
}

/// Builder for constructing a Logger from explicit appenders
///
/// # Example
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let logger = Logger::builder("App.Worker")
///     .appender(ConsoleAppender::new(LogLevel::Info).with_prefix("[{L}] "))
///     .build();
/// assert_eq!(logger.appender_count(), 1);
/// ```
pub struct LoggerBuilder {
    identity: String,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            appenders: Vec::new(),
        }
    }

    /// Add an appender; appenders receive calls in the order they were added
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add every appender the configuration selects for this identity
    ///
    /// # Errors
    ///
    /// Returns the first configuration error met while building them
    pub fn configured(mut self, config: &LoggerConfig) -> Result<Self> {
        let resolved = AppenderSelector::new(config).resolve(&self.identity)?;
        self.appenders.extend(resolved);
        Ok(self)
    }

    pub fn build(self) -> Logger {
        Logger::from_appenders(self.identity, self.appenders)
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(identity: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(identity)
    }
}
