//! Moniker expansion for line prefixes and file names
//!
//! A moniker is a three-character token `{x}` replaced by a value derived from
//! the current time or the severity being logged. Expansion is a single
//! left-to-right pass, so a substituted value is never scanned again, and any
//! brace sequence that is not a known moniker is copied through unchanged.
//!
//! | Moniker | Value                          | Line | File name |
//! |---------|--------------------------------|------|-----------|
//! | `{y}`   | year                           | yes  | yes       |
//! | `{M}`   | month, 2 digits                | yes  | yes       |
//! | `{d}`   | day, 2 digits                  | yes  | yes       |
//! | `{H}`   | hour (24h), 2 digits           | yes  | yes       |
//! | `{m}`   | minute, 2 digits               | yes  |           |
//! | `{s}`   | second, 2 digits               | yes  |           |
//! | `{f}`   | millisecond, 3 digits          | yes  |           |
//! | `{w}`   | weekday number, 0 = Sunday     | yes  |           |
//! | `{W}`   | weekday name                   | yes  |           |
//! | `{L}`   | severity name                  | yes  |           |
//! | `{D}`   | `yyyy/MM/dd`                   | yes  |           |
//! | `{T}`   | `HH:mm:ss`                     | yes  |           |
//! | `{t}`   | `HH:mm:ss.fff`                 | yes  |           |

use chrono::{Datelike, Local, Timelike, Weekday};

/// Which monikers a template recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonikerSet {
    /// Every moniker, used for log line prefixes
    Line,
    /// `{y}{M}{d}{H}` only, so file names change at most hourly
    FileName,
}

/// A format string with moniker placeholders
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::core::Template;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 1, 8)
///     .unwrap()
///     .and_hms_milli_opt(10, 30, 45, 7)
///     .unwrap();
///
/// let prefix = Template::line("{D} {t} [{L}] ");
/// assert_eq!(prefix.expand_at(&now, Some("INFO")), "2025/01/08 10:30:45.007 [INFO] ");
///
/// let file = Template::file_name("app-{y}{M}{d}{H}-{m}");
/// assert_eq!(file.expand_at(&now, None), "app-2025010810-{m}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pattern: String,
    monikers: MonikerSet,
}

impl Template {
    #[must_use]
    pub fn line(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            monikers: MonikerSet::Line,
        }
    }

    #[must_use]
    pub fn file_name(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            monikers: MonikerSet::FileName,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn monikers(&self) -> MonikerSet {
        self.monikers
    }

    /// Expand against the current local time
    #[must_use]
    pub fn expand(&self, level_name: Option<&str>) -> String {
        self.expand_at(&Local::now(), level_name)
    }

    /// Expand against a fixed instant
    ///
    /// `level_name` fills `{L}`; `None` expands it to an empty string.
    #[must_use]
    pub fn expand_at<T>(&self, now: &T, level_name: Option<&str>) -> String
    where
        T: Datelike + Timelike,
    {
        let mut output = String::with_capacity(self.pattern.len() + 16);
        let mut rest = self.pattern.as_str();

        while let Some(open) = rest.find('{') {
            output.push_str(&rest[..open]);
            let tail = &rest[open..];
            let mut chars = tail[1..].chars();

            if let (Some(key), Some('}')) = (chars.next(), chars.next()) {
                if self.recognizes(key) {
                    self.push_moniker(&mut output, key, now, level_name);
                    rest = &tail[2 + key.len_utf8()..];
                    continue;
                }
            }

            output.push('{');
            rest = &tail[1..];
        }

        output.push_str(rest);
        output
    }

    fn recognizes(&self, key: char) -> bool {
        match self.monikers {
            MonikerSet::FileName => matches!(key, 'y' | 'M' | 'd' | 'H'),
            MonikerSet::Line => matches!(
                key,
                'y' | 'M' | 'd' | 'H' | 'm' | 's' | 'f' | 'w' | 'W' | 'L' | 'D' | 'T' | 't'
            ),
        }
    }

    fn push_moniker<T>(&self, out: &mut String, key: char, now: &T, level_name: Option<&str>)
    where
        T: Datelike + Timelike,
    {
        use std::fmt::Write;

        // Leap seconds report nanoseconds past 1e9
        let millis = (now.nanosecond() / 1_000_000).min(999);

        // Writing into a String cannot fail
        let _ = match key {
            'y' => write!(out, "{}", now.year()),
            'M' => write!(out, "{:02}", now.month()),
            'd' => write!(out, "{:02}", now.day()),
            'H' => write!(out, "{:02}", now.hour()),
            'm' => write!(out, "{:02}", now.minute()),
            's' => write!(out, "{:02}", now.second()),
            'f' => write!(out, "{:03}", millis),
            'w' => write!(out, "{}", now.weekday().num_days_from_sunday()),
            'W' => write!(out, "{}", weekday_name(now.weekday())),
            'L' => write!(out, "{}", level_name.unwrap_or_default()),
            'D' => write!(out, "{}/{:02}/{:02}", now.year(), now.month(), now.day()),
            'T' => write!(
                out,
                "{:02}:{:02}:{:02}",
                now.hour(),
                now.minute(),
                now.second()
            ),
            't' => write!(
                out,
                "{:02}:{:02}:{:02}.{:03}",
                now.hour(),
                now.minute(),
                now.second(),
                millis
            ),
            _ => Ok(()),
        };
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
