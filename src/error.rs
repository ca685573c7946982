//! Errors raised while patching or restoring a target file

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Outcome of the rollback attempted after a failed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The original content was copied back from the backup
    Restored,
    /// Copying the backup over the target failed as well
    Failed,
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::Restored => f.write_str("original file restored from backup"),
            Recovery::Failed => f.write_str("restoring the original file from backup failed"),
        }
    }
}

/// Errors when patching a file
#[derive(Debug, Error)]
pub enum PatchError {
    /// Target file does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Backup suffix maps the backup onto the target itself
    #[error("backup path {} is the target itself, choose a non-empty backup suffix", .0.display())]
    InvalidBackupPath(PathBuf),
    /// Target could not be read as UTF-8 text
    #[error("failed to read file: {0}")]
    Read(#[source] io::Error),
    /// Target already carries one of the patch signatures
    #[error("file is already patched, skipping")]
    AlreadyPatched,
    /// The `async callApi(...) {` anchor is not present in the target
    #[error("async callApi function not found")]
    AnchorNotFound,
    /// Write permission could not be granted on the target
    #[error("unable to obtain write permission for {}", .0.display())]
    PermissionDenied(PathBuf),
    /// Backup copy could not be created
    #[error("failed to create backup: {0}")]
    Backup(#[source] io::Error),
    /// Patched content could not be written
    #[error("failed to write patched file: {source}; {recovery}")]
    Write {
        /// Underlying write error
        source: io::Error,
        /// Whether the rollback from backup succeeded
        recovery: Recovery,
    },
    /// No backup exists to restore from
    #[error("backup file not found: {}", .0.display())]
    BackupMissing(PathBuf),
    /// Backup exists but copying it over the target failed
    #[error("restore failed: {0}")]
    Restore(#[source] io::Error),
}
