//! JavaScript snippets injected at the top of the extension's `callApi` method.
//!
//! Inside `callApi`, `s` is the endpoint name and `i` is the request payload. Every mode snippet is
//! gated on [`TELEMETRY_GUARD`] so that only `report-*` and `record-*` endpoints are touched.

use crate::mode::PatchMode;

/// Condition that matches telemetry endpoints
const TELEMETRY_GUARD: &str =
    r#"if (typeof s === "string" && (s.startsWith("report-") || s.startsWith("record-")))"#;

/// Replaces the client's session id with a fresh v4-shaped uuid and blanks the user agent.
///
/// The leading space separates it from the mode snippet it is appended to.
pub const SESSION_RANDOMIZER: &str = r#" const chars = "0123456789abcdef"; let randSessionId = ""; for (let i = 0; i < 36; i++) { randSessionId += i === 8 || i === 13 || i === 18 || i === 23 ? "-" : i === 14 ? "4" : i === 19 ? chars[8 + Math.floor(4 * Math.random())] : chars[Math.floor(16 * Math.random())]; } this.sessionId = randSessionId; this._userAgent = "";"#;

/// Substrings that only appear in a file once one of our patches has been applied
pub const PATCH_SIGNATURES: [&str; 4] = [
    r#"startsWith("report-")"#,
    r#"startsWith("record-")"#,
    "randSessionId",
    r#"this._userAgent = """#,
];

/// Body executed when a telemetry endpoint is hit
fn mode_body(mode: PatchMode) -> &'static str {
    match mode {
        PatchMode::Block => "{ return { success: true }; }",
        PatchMode::Random => {
            "{ i = { timestamp: Date.now(), version: Math.random().toString(36).substring(2, 8) }; }"
        }
        PatchMode::Empty => "{ i = {}; }",
        PatchMode::Stealth => {
            "{ i = { timestamp: Date.now(), session: Math.random().toString(36).substring(2, 10), events: [] }; }"
        }
        PatchMode::Debug => {
            r#"{ console.debug("[telepatch] intercepted telemetry call:", s, i); i = { timestamp: Date.now(), version: Math.random().toString(36).substring(2, 8) }; }"#
        }
    }
}

/// Generates the telemetry interceptor for `mode`
pub fn mode_snippet(mode: PatchMode) -> String {
    format!("{TELEMETRY_GUARD} {}", mode_body(mode))
}

/// Generates the complete code inserted into the target: the mode snippet followed by the session randomizer
pub fn build_patch(mode: PatchMode) -> String {
    let mut patch = mode_snippet(mode);
    patch.push_str(SESSION_RANDOMIZER);
    patch
}
