use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;

/// Name of the append-only error log in the working directory
pub const ERROR_LOG_FILE: &str = "error.log";

/// Append a timestamped entry to the error log.
///
/// Logging is best-effort; a failure to append is swallowed.
pub fn log_error(message: &str) {
    append_entry(Path::new(ERROR_LOG_FILE), message);
}

fn append_entry(path: &Path, message: &str) {
    let timestamp = Local::now().to_rfc3339();
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "[{}] {}", timestamp, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_append_entry_is_timestamped_and_appends() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("error.log");

        append_entry(&log_path, "first failure");
        append_entry(&log_path, "second failure");

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("first failure"));
        assert!(lines[1].ends_with("second failure"));
    }

    #[test]
    fn test_append_entry_swallows_unwritable_target() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending; this must not panic.
        append_entry(dir.path(), "ignored");
    }
}
