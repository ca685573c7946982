//! This module contains the in-memory half of patching: finding where code goes and splicing it in

use crate::config::PatcherConfig;
use crate::error::PatchError;

/// Patcher for source text held in memory.
/// Never touches the filesystem; [`FilePatcher`](super::file::FilePatcher) builds on it.
pub struct TextPatcher<'c> {
    /// Anchor and signatures to use
    config: &'c PatcherConfig,
}
impl<'c> TextPatcher<'c> {
    /// Creates a new [`TextPatcher`]
    pub fn new(config: &'c PatcherConfig) -> Self {
        Self { config }
    }

    /// Whether `content` already carries any patch signature
    pub fn is_patched(&self, content: &str) -> bool {
        self.config
            .signatures
            .iter()
            .any(|sig| content.contains(sig.as_str()))
    }

    /// Byte offset just past the first anchor match, if any
    pub fn insertion_point(&self, content: &str) -> Option<usize> {
        self.config.anchor.find(content).map(|m| m.end())
    }

    /// Returns `content` with `code` inserted right after the anchor.
    ///
    /// Fails with [`PatchError::AlreadyPatched`] before looking for the anchor, so a patched file is
    /// never reported as missing its anchor.
    pub fn splice(&self, content: &str, code: &str) -> Result<String, PatchError> {
        if self.is_patched(content) {
            return Err(PatchError::AlreadyPatched);
        }
        let at = self
            .insertion_point(content)
            .ok_or(PatchError::AnchorNotFound)?;

        let mut patched = String::with_capacity(content.len() + code.len());
        patched.push_str(&content[..at]);
        patched.push_str(code);
        patched.push_str(&content[at..]);
        Ok(patched)
    }
}
