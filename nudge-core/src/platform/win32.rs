//! Win32 display enumeration, mode change, window hiding and auto-start
//! registration.
//!
//! # Platform
//!
//! Windows-only. On other platforms [`Win32Platform`] is defined but
//! enumeration reports an empty device list and every other call
//! returns [`NudgeError::Unsupported`].

use std::path::Path;

use crate::display::types::DisplayModeRequest;
use crate::error::NudgeError;
use crate::platform::{DeviceQuery, Platform};

/// Subkey under `HKEY_CURRENT_USER` holding run-at-login entries.
pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

// ── Win32Platform ────────────────────────────────────────────────

/// The real OS adapter used by the agent.
///
/// Holds no state; every call goes straight to `user32` / `advapi32`.
#[derive(Debug, Clone, Copy)]
pub struct Win32Platform;

impl Win32Platform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Win32Platform {
    fn default() -> Self {
        Self::new()
    }
}

/// NUL-terminated UTF-16 copy of `s`.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a fixed-size UTF-16 buffer up to its first NUL.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn from_wide(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

// ── Windows implementation ───────────────────────────────────────

#[cfg(target_os = "windows")]
mod platform {
    use super::*;
    use crate::display::types::DisplayDeviceRecord;
    use crate::flags::DisplayStateFlags;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{ERROR_SUCCESS, HWND};
    use windows::Win32::Graphics::Gdi::{
        ChangeDisplaySettingsExW, EnumDisplayDevicesW, CDS_TYPE, DEVMODEW, DEVMODE_FIELD_FLAGS,
        DISPLAY_DEVICEW, DISP_CHANGE_SUCCESSFUL,
    };
    use windows::Win32::System::Console::GetConsoleWindow;
    use windows::Win32::System::Registry::{RegSetKeyValueW, HKEY_CURRENT_USER, REG_SZ};
    use windows::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_HIDE};

    impl Platform for Win32Platform {
        fn hide_main_window(&self) -> Result<(), NudgeError> {
            unsafe {
                let hwnd = GetConsoleWindow();
                if hwnd.0.is_null() {
                    return Ok(());
                }
                // Return value is the previous visibility, not an error.
                let _ = ShowWindow(hwnd, SW_HIDE);
            }
            Ok(())
        }

        fn register_autostart(&self, name: &str, path: &Path) -> Result<(), NudgeError> {
            let subkey = to_wide(RUN_KEY);
            let value_name = to_wide(name);
            let value = to_wide(&path.to_string_lossy());
            let byte_len = (value.len() * std::mem::size_of::<u16>()) as u32;

            let status = unsafe {
                RegSetKeyValueW(
                    HKEY_CURRENT_USER,
                    PCWSTR(subkey.as_ptr()),
                    PCWSTR(value_name.as_ptr()),
                    REG_SZ.0,
                    Some(value.as_ptr().cast()),
                    byte_len,
                )
            };
            if status != ERROR_SUCCESS {
                return Err(NudgeError::win32("RegSetKeyValueW", status.0));
            }
            Ok(())
        }

        fn query_display_device(&self, index: u32) -> DeviceQuery {
            let mut device = DISPLAY_DEVICEW {
                cb: std::mem::size_of::<DISPLAY_DEVICEW>() as u32,
                ..Default::default()
            };

            let found = unsafe { EnumDisplayDevicesW(PCWSTR::null(), index, &mut device, 0) };
            // FALSE is the only failure signal the API gives; it means
            // "no device at this index".
            if !found.as_bool() {
                return DeviceQuery::EndOfList;
            }

            DeviceQuery::Device(DisplayDeviceRecord {
                index,
                name: from_wide(&device.DeviceName),
                description: from_wide(&device.DeviceString),
                device_id: from_wide(&device.DeviceID),
                device_key: from_wide(&device.DeviceKey),
                state: DisplayStateFlags::from_raw(device.StateFlags.0),
            })
        }

        fn apply_display_mode(&self, request: &DisplayModeRequest) -> Result<(), NudgeError> {
            let target = to_wide(&request.target);
            let desc = &request.descriptor;

            let mut devmode = DEVMODEW::default();
            devmode.dmSize = desc.size;
            devmode.dmFields = DEVMODE_FIELD_FLAGS(desc.fields);
            devmode.dmBitsPerPel = desc.bits_per_pel;
            devmode.dmPelsWidth = desc.pels_width;
            devmode.dmPelsHeight = desc.pels_height;
            devmode.dmDisplayFrequency = desc.display_frequency;

            let result = unsafe {
                ChangeDisplaySettingsExW(
                    PCWSTR(target.as_ptr()),
                    Some(&devmode as *const DEVMODEW),
                    HWND::default(),
                    CDS_TYPE(request.flags),
                    None,
                )
            };
            if result != DISP_CHANGE_SUCCESSFUL {
                return Err(NudgeError::win32("ChangeDisplaySettingsExW", result.0));
            }
            Ok(())
        }
    }

}

// ── Non-Windows stub ─────────────────────────────────────────────

#[cfg(not(target_os = "windows"))]
mod platform {
    use super::*;

    impl Platform for Win32Platform {
        fn hide_main_window(&self) -> Result<(), NudgeError> {
            Err(NudgeError::Unsupported("window hiding"))
        }

        fn register_autostart(&self, _name: &str, _path: &Path) -> Result<(), NudgeError> {
            Err(NudgeError::Unsupported("auto-start registration"))
        }

        fn query_display_device(&self, _index: u32) -> DeviceQuery {
            DeviceQuery::EndOfList
        }

        fn apply_display_mode(&self, _request: &DisplayModeRequest) -> Result<(), NudgeError> {
            Err(NudgeError::Unsupported("display mode change"))
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
