//! File appender implementation
//!
//! The configured path is split once into a directory, a file stem and an
//! extension. The stem may contain `{y}{M}{d}{H}` monikers; it is re-expanded
//! on every write, so a stem like `app-{y}{M}{d}{H}` rolls over to a new file
//! every hour without any rotation bookkeeping.

use super::retention;
use crate::core::{Appender, LogEntry, LogLevel, LoggerError, Result, Template};
use chrono::{DateTime, Local};
use fs2::FileExt;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension used when the configured path has none
pub const DEFAULT_EXTENSION: &str = "log";

pub struct FileAppender {
    threshold: LogLevel,
    name: String,
    prefix: Template,
    directory: PathBuf,
    stem: Template,
    extension: String,
}

impl FileAppender {
    /// Create a file appender for a path template
    ///
    /// # Errors
    ///
    /// Returns `MissingConfiguration` if the path is empty or has no file name
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_leveled_logger::appenders::FileAppender;
    /// use rust_leveled_logger::LogLevel;
    ///
    /// let appender = FileAppender::new("/var/log/app-{y}{M}{d}.log", LogLevel::Info)
    ///     .unwrap()
    ///     .with_prefix("{D} {T} [{L}] ")
    ///     .with_retention(14)
    ///     .unwrap();
    /// ```
    pub fn new(path: impl AsRef<Path>, threshold: LogLevel) -> Result<Self> {
        let path = path.as_ref();
        let missing = || LoggerError::missing_configuration("File", "FilePath");

        if path.as_os_str().is_empty() {
            return Err(missing());
        }

        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir()?.join(path)
        };

        let stem = full_path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(missing)?
            .to_string();
        let extension = full_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(DEFAULT_EXTENSION)
            .to_string();
        let directory = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            threshold,
            name: "Logger".to_string(),
            prefix: Template::line(""),
            directory,
            stem: Template::file_name(stem),
            extension,
        })
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

    /// Delete files in the target directory older than `max_days`
    ///
    /// # Errors
    ///
    /// Returns `RetentionSweep` if an expired file cannot be deleted
    pub fn with_retention(self, max_days: i64) -> Result<Self> {
        retention::sweep_expired(&self.directory, &self.extension, max_days, Local::now())?;
        Ok(self)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File the next write at `now` goes to
    pub fn path_at(&self, now: &DateTime<Local>) -> PathBuf {
        let stem = self.stem.expand_at(now, None);
        self.directory.join(format!("{}.{}", stem, self.extension))
    }

    pub fn current_path(&self) -> PathBuf {
        self.path_at(&Local::now())
    }

    fn append_line(path: &Path, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.try_lock_exclusive()?;

        let written = file.write_all(line.as_bytes());
        let unlocked = FileExt::unlock(&file);
        written.and(unlocked)
    }
}

/// Failures worth retrying: lock contention and sharing violations
fn is_transient(error: &io::Error) -> bool {
    let kind = error.kind();
    matches!(
        kind,
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    ) || (cfg!(windows) && kind == io::ErrorKind::PermissionDenied)
        || error
            .raw_os_error()
            .is_some_and(|code| fs2::lock_contended_error().raw_os_error() == Some(code))
}

impl Appender for FileAppender {
    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.prefix.expand_at(&entry.timestamp, Some(entry.level_name()));
        line.push_str(&entry.message);
        line.push('\n');

        fs::create_dir_all(&self.directory).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", self.directory.display()),
                e,
            )
        })?;

        let path = self.path_at(&entry.timestamp);

        // Contention is expected to clear; keep trying until the line lands
        loop {
            match Self::append_line(&path, &line) {
                Ok(()) => return Ok(()),
                Err(e) if is_transient(&e) => continue,
                Err(e) => {
                    return Err(LoggerError::io_operation(
                        "writing log file",
                        format!("Failed to append to '{}'", path.display()),
                        e,
                    ));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_empty_path_is_missing_configuration() {
        let err = FileAppender::new("", LogLevel::Info).err().unwrap();
        assert!(matches!(err, LoggerError::MissingConfiguration { .. }));
    }

    #[test]
    fn test_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut appender = FileAppender::new(&path, LogLevel::Debug)
            .unwrap()
            .with_prefix("[{L}] ");

        appender.emit(&LogEntry::new(LogLevel::Info, "first")).unwrap();
        appender.emit(&LogEntry::new(LogLevel::Trace, "filtered")).unwrap();
        appender.emit(&LogEntry::new(LogLevel::Error, "second")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[INFO] first\n[ERROR] second\n");
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("app.log");
        let mut appender = FileAppender::new(&path, LogLevel::Trace).unwrap();

        appender.emit(&LogEntry::new(LogLevel::Info, "hello")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_default_extension() {
        let dir = tempdir().unwrap();
        let appender = FileAppender::new(dir.path().join("plain"), LogLevel::Info).unwrap();
        assert_eq!(appender.extension(), DEFAULT_EXTENSION);
        assert!(appender.current_path().ends_with("plain.log"));
    }

    #[test]
    fn test_file_name_rolls_over_by_hour() {
        let dir = tempdir().unwrap();
        let appender =
            FileAppender::new(dir.path().join("app-{y}{M}{d}{H}.log"), LogLevel::Info).unwrap();

        let nine = Local.with_ymd_and_hms(2025, 1, 8, 9, 59, 59).single().unwrap();
        let ten = Local.with_ymd_and_hms(2025, 1, 8, 10, 0, 0).single().unwrap();

        assert_eq!(appender.path_at(&nine), dir.path().join("app-2025010809.log"));
        assert_eq!(appender.path_at(&ten), dir.path().join("app-2025010810.log"));
    }

    #[test]
    fn test_entry_timestamp_selects_file() {
        let dir = tempdir().unwrap();
        let mut appender =
            FileAppender::new(dir.path().join("app-{y}{M}{d}.log"), LogLevel::Info).unwrap();

        let day = Local.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).single().unwrap();
        let entry = LogEntry::new(LogLevel::Info, "leap").with_timestamp(day);
        appender.emit(&entry).unwrap();

        let content = fs::read_to_string(dir.path().join("app-20240229.log")).unwrap();
        assert_eq!(content, "leap\n");
    }

    #[test]
    fn test_retention_keeps_fresh_files() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("old.log");
        fs::write(&existing, "x\n").unwrap();

        let appender = FileAppender::new(dir.path().join("app.log"), LogLevel::Info)
            .unwrap()
            .with_retention(7)
            .unwrap();

        assert!(existing.exists());
        assert_eq!(appender.directory(), dir.path());
    }

    #[test]
    fn test_lock_contention_is_transient() {
        assert!(is_transient(&fs2::lock_contended_error()));
        assert!(!is_transient(&io::Error::new(io::ErrorKind::NotFound, "gone")));
    }
}
