//! OS capabilities the polling loop depends on.
//!
//! The run loop, the inventory reader and the recovery actuator only
//! see the [`Platform`] trait. [`Win32Platform`] is the real adapter;
//! tests substitute a fake.
//!
//! | Module    | Purpose                                            |
//! |-----------|----------------------------------------------------|
//! | `win32`   | `EnumDisplayDevicesW`, `ChangeDisplaySettingsExW`, `ShowWindow`, HKCU `Run` key |

use std::path::Path;

use crate::display::types::{DisplayDeviceRecord, DisplayModeRequest};
use crate::error::NudgeError;

pub mod win32;

pub use win32::Win32Platform;

// ── DeviceQuery ──────────────────────────────────────────────────

/// Answer of the enumeration primitive for one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceQuery {
    /// A device exists at this index.
    Device(DisplayDeviceRecord),
    /// No device at this index; enumeration is complete.
    EndOfList,
    /// The call failed for a reason other than end-of-list, with the
    /// raw OS error code.
    Failed(i64),
}

// ── Platform ─────────────────────────────────────────────────────

/// Process-wide OS state touched by one active cycle.
pub trait Platform {
    /// Hide the process's main window. No window is not an error.
    fn hide_main_window(&self) -> Result<(), NudgeError>;

    /// Create or overwrite the current user's run-at-login entry.
    fn register_autostart(&self, name: &str, path: &Path) -> Result<(), NudgeError>;

    /// Query the display device at `index` with no device-name filter.
    fn query_display_device(&self, index: u32) -> DeviceQuery;

    /// Ask the OS to apply `request` to its target adapter.
    fn apply_display_mode(&self, request: &DisplayModeRequest) -> Result<(), NudgeError>;
}

impl<P: Platform + ?Sized> Platform for &P {
    fn hide_main_window(&self) -> Result<(), NudgeError> {
        (**self).hide_main_window()
    }

    fn register_autostart(&self, name: &str, path: &Path) -> Result<(), NudgeError> {
        (**self).register_autostart(name, path)
    }

    fn query_display_device(&self, index: u32) -> DeviceQuery {
        (**self).query_display_device(index)
    }

    fn apply_display_mode(&self, request: &DisplayModeRequest) -> Result<(), NudgeError> {
        (**self).apply_display_mode(request)
    }
}
