//! Rendering helpers for method tracing messages

use chrono::TimeDelta;
use std::fmt;
use std::path::{Path, PathBuf};

/// How a value appears in method start/end trace lines
///
/// Strings and paths are quoted, absent values are spelled `null`, everything
/// else uses its `Display` output. Any other `Display` value can be traced by
/// wrapping it in [`Traced`]; the tracing macros do that automatically.
pub trait TraceFormat {
    fn trace_format(&self) -> String;
}

impl TraceFormat for str {
    fn trace_format(&self) -> String {
        format!("\"{}\"", self)
    }
}

impl TraceFormat for String {
    fn trace_format(&self) -> String {
        self.as_str().trace_format()
    }
}

impl<T: TraceFormat + ?Sized> TraceFormat for &T {
    fn trace_format(&self) -> String {
        (**self).trace_format()
    }
}

impl<T: TraceFormat> TraceFormat for Option<T> {
    fn trace_format(&self) -> String {
        match self {
            Some(value) => value.trace_format(),
            None => "null".to_string(),
        }
    }
}

impl TraceFormat for () {
    fn trace_format(&self) -> String {
        "null".to_string()
    }
}

impl TraceFormat for Path {
    fn trace_format(&self) -> String {
        format!("\"{}\"", self.display())
    }
}

impl TraceFormat for PathBuf {
    fn trace_format(&self) -> String {
        self.as_path().trace_format()
    }
}

/// Traces any `Display` value by its unquoted `Display` output
///
/// # Example
///
/// ```
/// use rust_leveled_logger::core::method_trace::{start_message, Traced};
/// use std::net::Ipv4Addr;
///
/// let addr = Ipv4Addr::LOCALHOST;
/// assert_eq!(
///     start_message("net::bind", &[&Traced(&addr), &8080]),
///     "Starting method net::bind( 127.0.0.1, 8080)"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traced<T>(pub T);

impl<T: fmt::Display> TraceFormat for Traced<T> {
    fn trace_format(&self) -> String {
        self.0.to_string()
    }
}

/// Call-site rendering used by the tracing macros
///
/// `(&Arg(&value)).trace_text()` picks the [`TraceFormat`] rendering when the
/// value has one and falls back to `Display` otherwise.
#[doc(hidden)]
pub mod render {
    use super::TraceFormat;
    use std::fmt;

    pub struct Arg<'a, T: ?Sized>(pub &'a T);

    pub trait ViaTraceFormat {
        fn trace_text(&self) -> String;
    }

    impl<T: TraceFormat + ?Sized> ViaTraceFormat for Arg<'_, T> {
        fn trace_text(&self) -> String {
            self.0.trace_format()
        }
    }

    pub trait ViaDisplay {
        fn trace_text(&self) -> String;
    }

    impl<T: fmt::Display + ?Sized> ViaDisplay for &Arg<'_, T> {
        fn trace_text(&self) -> String {
            self.0.to_string()
        }
    }
}

macro_rules! display_trace_format {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TraceFormat for $ty {
                fn trace_format(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_trace_format!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// `Starting method name( a, b)` text
pub fn start_message(method: &str, args: &[&dyn TraceFormat]) -> String {
    let mut message = format!("Starting method {}(", method);
    let rendered: Vec<String> = args.iter().map(|arg| format!(" {}", arg.trace_format())).collect();
    message.push_str(&rendered.join(","));
    message.push(')');
    message
}

pub fn end_message(method: &str) -> String {
    format!("Finishing method {}", method)
}

pub fn end_with_value_message(method: &str, value: &dyn TraceFormat) -> String {
    format!("Finishing method {}, returning {}", method, value.trace_format())
}

/// `[-][d.]hh:mm:ss[.fffffff]`; the fraction is left out when it is zero
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let sign = if elapsed < TimeDelta::zero() { "-" } else { "" };
    let elapsed = elapsed.abs();

    let days = elapsed.num_days();
    let hours = elapsed.num_hours() % 24;
    let minutes = elapsed.num_minutes() % 60;
    let seconds = elapsed.num_seconds() % 60;
    let ticks = elapsed.subsec_nanos() / 100;

    let mut text = String::from(sign);
    if days > 0 {
        text.push_str(&format!("{}.", days));
    }
    text.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        text.push_str(&format!(".{:07}", ticks));
    }
    text
}

/// Strip the closure frames `type_name` adds inside closures
#[doc(hidden)]
pub fn trim_closures(mut name: &str) -> &str {
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}
