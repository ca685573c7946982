//! This module contains the file patcher, which patches a target extension on disk and keeps a backup to restore it from

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::backup::{self, BackupOutcome};
use crate::code::js;
use crate::config::PatcherConfig;
use crate::error::{PatchError, Recovery};
use crate::mode::PatchMode;
use crate::perms::ensure_write_permission;
use crate::result::{PatchResult, PatchStatus};

use super::text::TextPatcher;
use super::{PatchGuard, Patcher};

/// Patcher for JavaScript files on disk.
///
/// Operations are blocking and hold no locks; callers must not run two of them on the same
/// target at once.
#[derive(Debug, Default, Clone)]
pub struct FilePatcher {
    /// Anchor, backup naming and signatures
    config: PatcherConfig,
}
impl FilePatcher {
    /// Creates a new [`FilePatcher`] with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`FilePatcher`] with a custom config
    pub fn with_config(config: PatcherConfig) -> Self {
        Self { config }
    }

    /// Path of the backup kept for `target`
    pub fn backup_path(&self, target: &Path) -> PathBuf {
        backup::backup_path(target, &self.config.backup_suffix)
    }

    /// Applies `mode` to `target` and reports the outcome
    pub fn apply_patch(&self, target: &Path, mode: PatchMode) -> PatchResult {
        match self.patch(target, mode) {
            Ok(guard) => {
                PatchResult::success("patch applied successfully", guard.target(), guard.backup())
            }
            Err(e) => {
                error!("{e}");
                e.into()
            }
        }
    }

    /// Restores `target` from its backup and reports the outcome
    pub fn restore_from_backup(&self, target: &Path) -> PatchResult {
        match self.restore(target) {
            Ok(backup) => PatchResult::success("restored from backup", target, &backup),
            Err(e) => {
                error!("{e}");
                e.into()
            }
        }
    }

    /// Reports whether `target` is patched
    pub fn patch_status(&self, target: &Path) -> PatchStatus {
        if !target.exists() {
            return PatchStatus::FileNotFound;
        }
        match fs::read_to_string(target) {
            Ok(content) if TextPatcher::new(&self.config).is_patched(&content) => {
                PatchStatus::Patched
            }
            Ok(_) => PatchStatus::NotPatched,
            Err(e) => {
                debug!("failed to read {}: {e}", target.display());
                PatchStatus::Unknown
            }
        }
    }

    /// Restores `target` from its backup, returning the backup's path
    pub fn restore(&self, target: &Path) -> Result<PathBuf, PatchError> {
        let backup = self.checked_backup_path(target)?;
        if !backup.exists() {
            return Err(PatchError::BackupMissing(backup));
        }
        if !ensure_write_permission(target) {
            return Err(PatchError::PermissionDenied(target.to_path_buf()));
        }

        backup::restore_backup(&backup, target).map_err(PatchError::Restore)?;
        info!("restored {} from backup", target.display());
        Ok(backup)
    }

    /// Path of the backup for `target`, refusing one that is `target` itself
    fn checked_backup_path(&self, target: &Path) -> Result<PathBuf, PatchError> {
        let backup = self.backup_path(target);
        if backup == target {
            return Err(PatchError::InvalidBackupPath(backup));
        }
        Ok(backup)
    }

    /// Does the work of [`Patcher::patch`], handing the final write of the patched content to `write`
    fn patch_with<W>(
        &self,
        target: &Path,
        mode: PatchMode,
        write: W,
    ) -> Result<FilePatchGuard<'_>, PatchError>
    where
        W: FnOnce(&Path, &str) -> io::Result<()>,
    {
        if !target.exists() {
            return Err(PatchError::NotFound(target.to_path_buf()));
        }
        let backup = self.checked_backup_path(target)?;

        info!("patching {}", target.display());
        info!("mode: {mode} - {}", mode.description());

        let content = fs::read_to_string(target).map_err(PatchError::Read)?;
        let patched = TextPatcher::new(&self.config).splice(&content, &js::build_patch(mode))?;

        if !ensure_write_permission(target) {
            return Err(PatchError::PermissionDenied(target.to_path_buf()));
        }

        let outcome = backup::create_backup(target, &backup).map_err(PatchError::Backup)?;
        debug!("backup {}: {outcome:?}", backup.display());

        if let Err(source) = write(target, &patched) {
            let recovery = self.rollback(target, &backup);
            return Err(PatchError::Write { source, recovery });
        }

        info!("patch applied: {}", target.display());
        Ok(FilePatchGuard {
            patcher: self,
            target: target.to_path_buf(),
            backup,
            outcome,
        })
    }

    /// Copies the backup back over `target` after a failed write
    fn rollback(&self, target: &Path, backup: &Path) -> Recovery {
        ensure_write_permission(target);
        match backup::restore_backup(backup, target) {
            Ok(()) => {
                warn!("restored original file from backup");
                Recovery::Restored
            }
            Err(e) => {
                error!("failed to restore original file: {e}");
                Recovery::Failed
            }
        }
    }
}

impl Patcher for FilePatcher {
    type Error = PatchError;
    type Guard<'a> = FilePatchGuard<'a>;

    /// Checks run in order: target exists and is not its own backup, target reads as UTF-8, not
    /// already patched, anchor present, target writable, backup in place. Nothing on disk changes
    /// before the anchor is found.
    fn patch<'a>(
        &'a self,
        target: &Path,
        mode: PatchMode,
    ) -> Result<Self::Guard<'a>, Self::Error> {
        self.patch_with(target, mode, |path, content| fs::write(path, content))
    }
}

/// Guard for file patches
///
/// See [`FilePatcher`]. Dropping the guard keeps the patch; call [`PatchGuard::restore`] to undo it.
#[derive(Debug)]
pub struct FilePatchGuard<'a> {
    /// Patcher that applied the patch
    patcher: &'a FilePatcher,
    /// Patched file
    target: PathBuf,
    /// Backup the target can be restored from
    backup: PathBuf,
    /// Whether the backup was taken by this patch or already existed
    outcome: BackupOutcome,
}
impl FilePatchGuard<'_> {
    /// Patched file
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Backup the target can be restored from
    pub fn backup(&self) -> &Path {
        &self.backup
    }

    /// Whether this patch created the backup
    pub fn backup_outcome(&self) -> BackupOutcome {
        self.outcome
    }
}
impl PatchGuard for FilePatchGuard<'_> {
    type Error = PatchError;

    fn restore(self) -> Result<(), Self::Error> {
        self.patcher.restore(&self.target).map(|_| ())
    }
}
