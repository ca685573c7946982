//! # Backup
//!
//! Every target gets at most one sibling backup, `<stem><suffix><ext>`, taken before its first patch.
//! Once created it is never overwritten and is the source of truth for restores.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// What [`create_backup`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A fresh copy of the target was written
    Created,
    /// A backup was already present and left untouched
    Existing,
}

/// Derives the backup path for `target`: `extension.js` becomes `extension<suffix>.js`
pub fn backup_path(target: &Path, suffix: &str) -> PathBuf {
    let mut name = target.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    if let Some(ext) = target.extension() {
        name.push(".");
        name.push(ext);
    }
    target.with_file_name(name)
}

/// Copies `target` to `backup` unless `backup` already exists.
///
/// The backup is opened with `create_new`, so an existing backup is never truncated.
pub fn create_backup(target: &Path, backup: &Path) -> io::Result<BackupOutcome> {
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(backup) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            warn!("backup already exists: {}", backup.display());
            return Ok(BackupOutcome::Existing);
        }
        Err(e) => return Err(e),
    };

    let copied = File::open(target)
        .and_then(|mut src| io::copy(&mut src, &mut dest))
        .and_then(|_| dest.sync_all())
        .and_then(|_| fs::metadata(target))
        .and_then(|meta| fs::set_permissions(backup, meta.permissions()));
    if let Err(e) = copied {
        // don't leave a truncated backup behind to be trusted later
        drop(dest);
        let _ = fs::remove_file(backup);
        return Err(e);
    }

    info!("backup created: {}", backup.display());
    Ok(BackupOutcome::Created)
}

/// Overwrites `target` with the content of `backup`. The backup itself is kept.
pub fn restore_backup(backup: &Path, target: &Path) -> io::Result<()> {
    fs::copy(backup, target).map(|_| ())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::backup::{backup_path, create_backup, restore_backup, BackupOutcome};

    #[test]
    /// Backup names keep the extension last
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/ext/out/extension.js"), "_ori"),
            Path::new("/ext/out/extension_ori.js")
        );
        assert_eq!(
            backup_path(Path::new("bundle.min.js"), "_ori"),
            Path::new("bundle.min_ori.js")
        );
        assert_eq!(backup_path(Path::new("main"), "_ori"), Path::new("main_ori"));
        assert_eq!(
            backup_path(Path::new("extension.js"), ".bak"),
            Path::new("extension.bak.js")
        );
    }

    #[test]
    /// A second backup attempt must not clobber the first one
    fn test_backup_created_once() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("extension.js");
        let backup = backup_path(&target, "_ori");

        fs::write(&target, "original").unwrap();
        assert_eq!(create_backup(&target, &backup).unwrap(), BackupOutcome::Created);
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original");

        // change the target and try again
        fs::write(&target, "changed").unwrap();
        assert_eq!(create_backup(&target, &backup).unwrap(), BackupOutcome::Existing);

        // backup still holds the first content
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original");
    }

    #[test]
    /// A failed copy leaves no backup behind
    fn test_backup_missing_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing.js");
        let backup = backup_path(&target, "_ori");

        assert!(create_backup(&target, &backup).is_err());
        assert!(!backup.exists());
    }

    #[test]
    fn test_restore_backup() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("extension.js");
        let backup = backup_path(&target, "_ori");

        fs::write(&target, "original").unwrap();
        create_backup(&target, &backup).unwrap();
        fs::write(&target, "patched").unwrap();

        restore_backup(&backup, &target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
        assert!(backup.exists());
    }
}
