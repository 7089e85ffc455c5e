//! Logging macros for ergonomic log message formatting.
//!
//! The level macros format their arguments like `format!` and forward the
//! result to the matching [`Logger`](crate::Logger) method. The method tracing
//! macros capture the name of the enclosing function at the call site.
//!
//! # Examples
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//! use rust_leveled_logger::{info, log_method_start, log_method_end};
//!
//! let logger = Logger::builder("App").build();
//!
//! fn load(logger: &Logger, path: &str) -> usize {
//!     log_method_start!(logger, path);
//!     let size = path.len();
//!     log_method_end!(logger, size)
//! }
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! assert_eq!(load(&logger, "app.json"), 8);
//! ```

/// Full path of the enclosing function, e.g. `my_app::worker::run`
///
/// Closure frames are stripped, so the macro names the surrounding function
/// when used inside a closure.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        $crate::core::method_trace::trim_closures(&name[..name.len() - 3])
    }};
}

/// Log a message with automatic formatting at any rank.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder("App").build();
/// use rust_leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, 100, "Custom rank {}", 100);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder("App").build();
/// use rust_leveled_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log a message that passes every threshold.
#[macro_export]
macro_rules! force {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Force, $($arg)+)
    };
}

/// Render one value for a trace line.
///
/// Values with a [`TraceFormat`](crate::TraceFormat) rendering use it; any
/// other `Display` value prints as-is.
#[doc(hidden)]
#[macro_export]
macro_rules! __trace_text {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::core::method_trace::render::{ViaDisplay as _, ViaTraceFormat as _};
        (&$crate::core::method_trace::render::Arg(&$value)).trace_text()
    }};
}

/// Trace entry into the enclosing function with the given arguments.
///
/// Arguments may be any `Display` value.
#[macro_export]
macro_rules! log_method_start {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.method_start(
            $crate::function_name!(),
            &[$(&$crate::core::method_trace::Traced($crate::__trace_text!($arg))
                as &dyn $crate::TraceFormat),*],
        )
    };
}

/// Trace exit from the enclosing function.
///
/// With a value, the value is traced and handed back, so the macro can end a
/// function body.
#[macro_export]
macro_rules! log_method_end {
    ($logger:expr) => {
        $logger.method_end($crate::function_name!())
    };
    ($logger:expr, $value:expr) => {{
        let value = $value;
        $logger.method_end_with(
            $crate::function_name!(),
            $crate::core::method_trace::Traced($crate::__trace_text!(value)),
        );
        value
    }};
}

/// Log an error raised in the enclosing function, with its cause chain.
#[macro_export]
macro_rules! log_error_in_method {
    ($logger:expr, $err:expr) => {
        $logger.error_in_method($crate::function_name!(), &$err)
    };
}

/// Log `name = value` for a variable at debug level.
#[macro_export]
macro_rules! log_variable {
    ($logger:expr, $var:expr) => {
        $logger.variable_value(stringify!($var), &$var)
    };
}
