//! # Patch
//!
//! This module covers patchers, which are used to inject code into a target file and restore it afterwards

use std::path::Path;

use crate::mode::PatchMode;

pub mod file;
pub mod text;

/// All patchers save enough state from where they patched to revert on-command
pub trait Patcher {
    /// Error type that can occur when patching
    type Error;
    /// Guard type for the patcher, used to restore the target.
    ///
    /// Unlike in-memory patches, file patches are meant to outlive the process, so dropping a guard
    /// leaves the patch in place.
    type Guard<'a>: PatchGuard + 'a
    where
        Self: 'a;

    /// Patches `target` with the code for `mode`
    fn patch<'a>(
        &'a self,
        target: &Path,
        mode: PatchMode,
    ) -> Result<Self::Guard<'a>, Self::Error>;
}

/// Guard for an applied patch
pub trait PatchGuard: Sized {
    /// Error type that can occur when restoring
    type Error;

    /// Restores the original content of the patched target
    fn restore(self) -> Result<(), Self::Error>;
}
