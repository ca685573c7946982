//! # Config
//!
//! Knobs for locating the insertion point, naming backups and detecting prior patches

use lazy_static::lazy_static;
use regex::Regex;

use crate::code::js::PATCH_SIGNATURES;

lazy_static! {
    /// Opening of the extension's `async callApi(...)` method, up to and including its `{`
    static ref CALL_API_ANCHOR: Regex =
        Regex::new(r"async\s+callApi\s*\([^)]*\)\s*\{").expect("anchor pattern is valid");
}

/// Suffix inserted between a target's stem and extension to name its backup
pub const DEFAULT_BACKUP_SUFFIX: &str = "_ori";

/// Settings shared by every operation of a [`FilePatcher`](crate::patcher::file::FilePatcher)
#[derive(Debug, Clone)]
pub struct PatcherConfig {
    /// Patch code is inserted right after the end of the first match
    pub anchor: Regex,
    /// `<stem><backup_suffix><ext>` names the backup of a target
    pub backup_suffix: String,
    /// A file containing any of these is considered patched
    pub signatures: Vec<String>,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            anchor: CALL_API_ANCHOR.clone(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_owned(),
            signatures: PATCH_SIGNATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PatcherConfig {
    /// Replaces the backup suffix
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }
}
