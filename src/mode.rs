//! # Mode
//!
//! Patch modes select what the injected code does with an intercepted telemetry call

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// What an intercepted telemetry call is turned into
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchMode {
    /// Short-circuit the call with a fake success; nothing is sent
    #[default]
    Block,
    /// Replace the payload with a timestamp and a random version string
    Random,
    /// Replace the payload with an empty object
    Empty,
    /// Replace the payload with realistic-looking but fake data
    Stealth,
    /// Log the intercepted call to the extension host console, then swap the payload as
    /// [`PatchMode::Random`] does
    Debug,
}

impl PatchMode {
    /// Every mode, in the order they are listed to users
    pub const ALL: [PatchMode; 5] = [
        PatchMode::Block,
        PatchMode::Random,
        PatchMode::Empty,
        PatchMode::Stealth,
        PatchMode::Debug,
    ];

    /// Literal name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            PatchMode::Block => "block",
            PatchMode::Random => "random",
            PatchMode::Empty => "empty",
            PatchMode::Stealth => "stealth",
            PatchMode::Debug => "debug",
        }
    }

    /// Human readable summary of the mode's effect
    pub fn description(self) -> &'static str {
        match self {
            PatchMode::Block => "full telemetry block - no data is sent",
            PatchMode::Random => "random fake data - the server receives meaningless payloads",
            PatchMode::Empty => "empty data - minimal payloads are sent",
            PatchMode::Stealth => "stealth - realistic but fake telemetry is sent",
            PatchMode::Debug => {
                "debug - intercepted calls are logged to the console and sent with random fake data"
            }
        }
    }
}

impl fmt::Display for PatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when parsing a [`PatchMode`] from an unknown name
#[derive(Debug, Error)]
#[error("unknown patch mode `{0}` (expected one of: block, random, empty, stealth, debug)")]
pub struct UnknownMode(String);

impl FromStr for PatchMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatchMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMode(s.to_owned()))
    }
}
