#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::missing_crate_level_docs)]
//! # telepatch
//!
//! Injects a small interceptor into a JavaScript extension bundle so that its telemetry calls are
//! blocked or fed fake data, keeping a `<stem>_ori<ext>` backup next to the target to restore from.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use telepatch::mode::PatchMode;
//! use telepatch::patcher::file::FilePatcher;
//!
//! let patcher = FilePatcher::new();
//! let target = Path::new("out/extension.js");
//!
//! let result = patcher.apply_patch(target, PatchMode::Stealth);
//! println!("{}: {}", result.success, result.message);
//! println!("{}", patcher.patch_status(target));
//!
//! patcher.restore_from_backup(target);
//! ```

pub mod backup;
pub mod code;
pub mod config;
pub mod error;
pub mod mode;
pub mod patcher;
pub mod perms;
pub mod result;
