//! Structured outcomes returned by the public patcher operations

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::PatchError;

/// Result of a mutating operation (apply or restore).
///
/// Operations never return an `Err` past their boundary; failures are reported here with
/// `success == false` and empty paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human readable summary
    pub message: String,
    /// Target that was modified, empty on failure
    pub file_path: String,
    /// Backup associated with the target, empty on failure
    pub backup_path: String,
}

impl PatchResult {
    /// Successful outcome for `file_path` with its `backup_path`
    pub fn success(message: impl Into<String>, file_path: &Path, backup_path: &Path) -> Self {
        Self {
            success: true,
            message: message.into(),
            file_path: file_path.display().to_string(),
            backup_path: backup_path.display().to_string(),
        }
    }

    /// Failed outcome carrying only a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            file_path: String::new(),
            backup_path: String::new(),
        }
    }
}

impl From<PatchError> for PatchResult {
    fn from(e: PatchError) -> Self {
        Self::failure(e.to_string())
    }
}

/// Patch state of a target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    /// Target does not exist
    FileNotFound,
    /// Target contains at least one patch signature
    Patched,
    /// Target exists and contains no patch signature
    NotPatched,
    /// Target exists but could not be read
    Unknown,
}

impl fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatchStatus::FileNotFound => "file not found",
            PatchStatus::Patched => "patched",
            PatchStatus::NotPatched => "not patched",
            PatchStatus::Unknown => "status unknown",
        })
    }
}
