use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use crate::error::{LlmeditError, LlmeditResult};

/// Output destination and backup policy for one run, immutable once computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePlan {
    /// Where the rewritten text goes
    pub target_path: PathBuf,

    /// Whether to copy the input aside before writing
    pub should_backup: bool,
}

impl WritePlan {
    /// Resolve the decision table for output destination and backup policy.
    ///
    /// `--inplace` wins over `--outfile`; both skip the backup. In default
    /// mode the input file is overwritten and the configuration decides
    /// whether a backup is taken.
    pub fn new(
        input_path: &Path,
        inplace: bool,
        outfile: Option<&Path>,
        backup_enabled: bool,
    ) -> Self {
        if inplace {
            Self {
                target_path: input_path.to_path_buf(),
                should_backup: false,
            }
        } else if let Some(out) = outfile {
            Self {
                target_path: out.to_path_buf(),
                should_backup: false,
            }
        } else {
            Self {
                target_path: input_path.to_path_buf(),
                should_backup: backup_enabled,
            }
        }
    }
}

/// Paths reported after a successful update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Where the rewritten text was written
    pub target_path: PathBuf,

    /// Backup path, when one was taken
    pub backup_path: Option<PathBuf>,
}

/// Perform the planned update: backup, write, restore on failure.
///
/// When the write destroys the input file and a backup exists, a failed
/// write triggers a restore from that backup. Without a backup the input
/// file's fate depends on how far the failed write got.
pub fn apply(
    plan: &WritePlan,
    input_path: &Path,
    backup_suffix: &str,
    content: &str,
) -> LlmeditResult<WriteOutcome> {
    apply_with(plan, input_path, backup_suffix, content, |path, text| {
        fs::write(path, text)
    })
}

/// The backup destination for an input path, `<input path><suffix>`
pub fn backup_destination(input_path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(input_path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

fn apply_with(
    plan: &WritePlan,
    input_path: &Path,
    backup_suffix: &str,
    content: &str,
    write: impl FnOnce(&Path, &str) -> std::io::Result<()>,
) -> LlmeditResult<WriteOutcome> {
    // Acquire: copy the original aside before anything destructive happens.
    let backup_path = if plan.should_backup {
        let backup = backup_destination(input_path, backup_suffix);
        debug!(
            "Backing up {} to {}",
            input_path.display(),
            backup.display()
        );
        // fs::copy carries the permission bits along with the content.
        fs::copy(input_path, &backup).map_err(|e| LlmeditError::Backup {
            source: e,
            path: input_path.to_path_buf(),
            backup: backup.clone(),
        })?;
        Some(backup)
    } else {
        None
    };

    // Attempt: truncate-then-write the target.
    debug!("Writing rewritten content to {}", plan.target_path.display());
    if let Err(write_err) = write(&plan.target_path, content) {
        return Err(recover(plan, input_path, backup_path, write_err));
    }

    Ok(WriteOutcome {
        target_path: plan.target_path.clone(),
        backup_path,
    })
}

/// Compensate for a failed write, restoring the input from its backup when
/// the write was aimed at the input file itself.
fn recover(
    plan: &WritePlan,
    input_path: &Path,
    backup_path: Option<PathBuf>,
    write_err: std::io::Error,
) -> LlmeditError {
    let restorable = plan.target_path == input_path
        && backup_path.as_deref().is_some_and(|b| b.exists());

    if !restorable {
        return LlmeditError::Write {
            source: write_err,
            path: plan.target_path.clone(),
            restored: false,
        };
    }

    let backup = backup_path.unwrap_or_default();
    warn!(
        "Write to {} failed, restoring from {}",
        input_path.display(),
        backup.display()
    );

    match fs::copy(&backup, input_path) {
        Ok(_) => {
            debug!("Restored {} from backup", input_path.display());
            LlmeditError::Write {
                source: write_err,
                path: plan.target_path.clone(),
                restored: true,
            }
        }
        Err(restore_err) => {
            error!(
                "Restore of {} from {} failed: {}",
                input_path.display(),
                backup.display(),
                restore_err
            );
            LlmeditError::Restore {
                source: restore_err,
                path: input_path.to_path_buf(),
                backup,
                write_source: write_err,
            }
        }
    }
}
