//! # Permissions
//!
//! Extension bundles are sometimes installed read-only. Before touching a target we make sure the
//! current user can write to it.

use std::fs::{self, Permissions};
use std::io;
use std::path::Path;

use tracing::{info, warn};

/// Grants write permission on `path` if it is missing.
///
/// Returns `true` if the file does not exist, is already writable, or was made writable.
/// Returns `false` only when the permissions could not be read or changed.
pub fn ensure_write_permission(path: &Path) -> bool {
    match grant_write_permission(path) {
        Ok(true) => {
            info!("added write permission to {}", path.display());
            true
        }
        Ok(false) => true,
        Err(e) => {
            warn!("failed to change permissions of {}: {e}", path.display());
            false
        }
    }
}

/// Adds the write bit to `path`, returning whether anything changed
fn grant_write_permission(path: &Path) -> io::Result<bool> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    let mut perms = meta.permissions();
    if !add_write_bit(&mut perms) {
        return Ok(false);
    }
    fs::set_permissions(path, perms)?;
    Ok(true)
}

/// Sets the owner write bit, returning `false` if it was already set
#[cfg(unix)]
fn add_write_bit(perms: &mut Permissions) -> bool {
    use std::os::unix::fs::PermissionsExt;

    /// `S_IWUSR`
    const OWNER_WRITE: u32 = 0o200;

    let mode = perms.mode();
    if mode & OWNER_WRITE != 0 {
        return false;
    }
    perms.set_mode(mode | OWNER_WRITE);
    true
}

/// Clears the read-only attribute, returning `false` if it wasn't set
#[cfg(not(unix))]
fn add_write_bit(perms: &mut Permissions) -> bool {
    if !perms.readonly() {
        return false;
    }
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    true
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::perms::ensure_write_permission;

    #[test]
    /// Missing files need nothing done to them
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_write_permission(&dir.path().join("missing.js")));
    }

    #[test]
    fn test_already_writable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extension.js");
        fs::write(&path, "").unwrap();

        assert!(ensure_write_permission(&path));
        assert!(!fs::metadata(&path).unwrap().permissions().readonly());
    }

    #[cfg(unix)]
    #[test]
    /// Read-only files get the owner write bit back without losing their other bits
    fn test_read_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extension.js");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        assert!(ensure_write_permission(&path));

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
