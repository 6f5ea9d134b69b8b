use std::path::PathBuf;
use thiserror::Error;

/// Main error type for llmedit
#[derive(Error, Debug)]
pub enum LlmeditError {
    #[error("Configuration file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse input file {}: {}", .path.display(), .message)]
    Parse { message: String, path: PathBuf },

    #[error("Text generation failed: {message}")]
    Generation { message: String },

    #[error("Failed to back up {} to {}: {}", .path.display(), .backup.display(), .source)]
    Backup {
        source: std::io::Error,
        path: PathBuf,
        backup: PathBuf,
    },

    #[error(
        "Failed to write {}: {}{}",
        .path.display(),
        .source,
        if *.restored { " (original restored from backup)" } else { "" }
    )]
    Write {
        source: std::io::Error,
        path: PathBuf,
        restored: bool,
    },

    #[error(
        "Failed to restore {} from backup {}: {} (write failure was: {})",
        .path.display(),
        .backup.display(),
        .source,
        .write_source
    )]
    Restore {
        source: std::io::Error,
        path: PathBuf,
        backup: PathBuf,
        write_source: std::io::Error,
    },
}

impl LlmeditError {
    /// Create a new config-not-found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create a new invalid-configuration error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Create a new parse error with path context
    pub fn parse_error(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// True for errors that may mean user data is lost
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Restore { .. })
    }
}

/// Result type alias using LlmeditError
pub type LlmeditResult<T> = Result<T, LlmeditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_only_restore_is_critical() {
        let restore = LlmeditError::Restore {
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            path: PathBuf::from("notes.txt"),
            backup: PathBuf::from("notes.txt.backup"),
            write_source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(restore.is_critical());

        let write = LlmeditError::Write {
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
            path: PathBuf::from("notes.txt"),
            restored: true,
        };
        assert!(!write.is_critical());
        assert!(!LlmeditError::generation("timeout").is_critical());
    }

    #[test]
    fn test_write_error_mentions_restore() {
        let err = LlmeditError::Write {
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
            path: PathBuf::from("notes.txt"),
            restored: true,
        };
        assert!(err.to_string().contains("restored from backup"));

        let err = LlmeditError::Write {
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
            path: PathBuf::from("notes.txt"),
            restored: false,
        };
        assert!(!err.to_string().contains("restored"));
    }
}
