//! Age-based deletion of old log files
//!
//! The sweep runs once, when a file appender is constructed. Files whose
//! creation time is older than the retention window are deleted; a delete that
//! keeps failing is retried a bounded number of times and then reported.

use crate::core::{LoggerError, Result};
use chrono::{DateTime, Local, TimeDelta};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Attempts made to delete one expired file before giving up
pub const MAX_DELETE_ATTEMPTS: u32 = 10;

/// Delete files in `directory` ending in `.{extension}` older than `max_days`
///
/// Only top-level regular files are considered. A file newer than
/// `now - max_days` is kept. Returns the paths that were deleted.
///
/// # Errors
///
/// Returns `RetentionSweep` when a file still cannot be deleted after
/// [`MAX_DELETE_ATTEMPTS`] attempts, or an IO error if the directory cannot be read.
pub fn sweep_expired(
    directory: &Path,
    extension: &str,
    max_days: i64,
    now: DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    let mut deleted = Vec::new();

    if !directory.is_dir() {
        return Ok(deleted);
    }

    // A window too large to represent keeps everything
    let Some(cutoff) = TimeDelta::try_days(max_days).and_then(|age| now.checked_sub_signed(age))
    else {
        return Ok(deleted);
    };

    let suffix = format!(".{}", extension);
    let entries = fs::read_dir(directory).map_err(|e| {
        LoggerError::io_operation(
            "sweeping expired log files",
            format!("Failed to list directory '{}'", directory.display()),
            e,
        )
    })?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let matches_suffix = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if !matches_suffix {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => continue,
        };

        let created: DateTime<Local> = birth_time(&metadata).into();
        if created > cutoff {
            continue;
        }

        delete_with_retry(&path)?;
        deleted.push(path);
    }

    Ok(deleted)
}

/// Creation time, or modification time where the platform has none
fn birth_time(metadata: &fs::Metadata) -> SystemTime {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or_else(|_| SystemTime::now())
}

pub(crate) fn delete_with_retry(path: &Path) -> Result<()> {
    let mut attempt = 1;
    loop {
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) if attempt >= MAX_DELETE_ATTEMPTS => {
                return Err(LoggerError::retention_sweep(
                    path.display().to_string(),
                    attempt,
                    e,
                ));
            }
            Err(_) => attempt += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "line\n").unwrap();
        path
    }

    #[test]
    fn test_old_file_deleted() {
        let dir = tempdir().unwrap();
        let old = touch(dir.path(), "app.log");

        let later = Local::now() + TimeDelta::days(8);
        let deleted = sweep_expired(dir.path(), "log", 7, later).unwrap();

        assert_eq!(deleted, vec![old.clone()]);
        assert!(!old.exists());
    }

    #[test]
    fn test_recent_file_kept() {
        let dir = tempdir().unwrap();
        let recent = touch(dir.path(), "app.log");

        let later = Local::now() + TimeDelta::days(6);
        let deleted = sweep_expired(dir.path(), "log", 7, later).unwrap();

        assert!(deleted.is_empty());
        assert!(recent.exists());
    }

    #[test]
    fn test_other_extensions_untouched() {
        let dir = tempdir().unwrap();
        let other = touch(dir.path(), "notes.txt");
        let similar = touch(dir.path(), "app.logx");

        let later = Local::now() + TimeDelta::days(30);
        sweep_expired(dir.path(), "log", 1, later).unwrap();

        assert!(other.exists());
        assert!(similar.exists());
    }

    #[test]
    fn test_subdirectories_ignored() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("archive.log");
        fs::create_dir(&nested).unwrap();

        let later = Local::now() + TimeDelta::days(30);
        let deleted = sweep_expired(dir.path(), "log", 1, later).unwrap();

        assert!(deleted.is_empty());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_missing_directory_is_empty_sweep() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let deleted = sweep_expired(&missing, "log", 1, Local::now()).unwrap();
        assert!(deleted.is_empty());
    }

    #[test]
    fn test_delete_gives_up_after_max_attempts() {
        let dir = tempdir().unwrap();
        let undeletable = dir.path().join("stuck.log");
        fs::create_dir(&undeletable).unwrap();

        let err = delete_with_retry(&undeletable).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::RetentionSweep { attempts: MAX_DELETE_ATTEMPTS, .. }
        ));
    }

    #[test]
    fn test_already_removed_counts_as_deleted() {
        let dir = tempdir().unwrap();
        assert!(delete_with_retry(&dir.path().join("gone.log")).is_ok());
    }
}
