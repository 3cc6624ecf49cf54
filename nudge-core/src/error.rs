//! Error types for display-nudge.
//!
//! Nothing in the polling loop is fatal: every `NudgeError` is logged
//! by the caller and the loop moves on to its next cycle.

use thiserror::Error;

/// The canonical error type for display-nudge.
#[derive(Debug, Error)]
pub enum NudgeError {
    // ── Platform Errors ──────────────────────────────────────────
    /// A Win32 call reported failure.
    #[error("{call} failed with code {code:#x}")]
    Win32 { call: &'static str, code: i64 },

    /// The requested capability does not exist on this platform.
    #[error("{0} is only available on Windows")]
    Unsupported(&'static str),

    // ── I/O Errors ───────────────────────────────────────────────
    /// Reading the executable path or writing the log file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for errors that do not fit another variant.
    #[error("{0}")]
    Other(String),
}

impl NudgeError {
    /// Shorthand for a failed Win32 call.
    pub fn win32(call: &'static str, code: impl Into<i64>) -> Self {
        NudgeError::Win32 {
            call,
            code: code.into(),
        }
    }
}

impl From<String> for NudgeError {
    fn from(s: String) -> Self {
        NudgeError::Other(s)
    }
}

impl From<&str> for NudgeError {
    fn from(s: &str) -> Self {
        NudgeError::Other(s.to_string())
    }
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for NudgeError {
    fn from(e: windows::core::Error) -> Self {
        NudgeError::Other(e.message())
    }
}
