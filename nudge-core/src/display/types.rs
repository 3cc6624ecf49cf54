//! Display inventory and mode-request types shared by the reader, the
//! recovery actuator and the platform adapters.

use std::fmt;

use crate::flags::DisplayStateFlags;

/// Logical device path of the first display adapter.
pub const DEFAULT_TARGET_ADAPTER: &str = r"\\.\DISPLAY1";

/// Declared size of a Win32 `DEVMODEW` block.
pub const DEVMODE_SIZE: u16 = 220;

// ── DisplayDeviceRecord ──────────────────────────────────────────

/// One display device as returned by a single enumeration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDeviceRecord {
    /// Enumeration position (0-based).
    pub index: u32,
    /// Short adapter identifier, e.g. `\\.\DISPLAY1`.
    pub name: String,
    /// Human-readable adapter description.
    pub description: String,
    /// PnP device identifier.
    pub device_id: String,
    /// Registry key of the device's settings.
    pub device_key: String,
    pub state: DisplayStateFlags,
}

impl DisplayDeviceRecord {
    /// Whether this device is attached to the desktop.
    pub fn is_attached(&self) -> bool {
        self.state.is_attached()
    }
}

impl fmt::Display for DisplayDeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Display {}: {} {} {} {} (state {:#x})",
            self.index,
            self.name,
            self.description,
            self.device_id,
            self.device_key,
            self.state.bits()
        )
    }
}

// ── InventorySnapshot ────────────────────────────────────────────

/// The devices seen by one enumeration pass, in enumeration order.
///
/// Rebuilt every cycle; never compared against a previous pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    records: Vec<DisplayDeviceRecord>,
}

impl InventorySnapshot {
    pub fn new(records: Vec<DisplayDeviceRecord>) -> Self {
        Self { records }
    }

    /// Number of devices attached to the desktop.
    pub fn attached_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_attached()).count()
    }

    pub fn records(&self) -> &[DisplayDeviceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<DisplayDeviceRecord>> for InventorySnapshot {
    fn from(records: Vec<DisplayDeviceRecord>) -> Self {
        Self::new(records)
    }
}

// ── ModeDescriptor ───────────────────────────────────────────────

/// Platform-neutral view of a `DEVMODEW` block.
///
/// Only the fields a mode change could consult are modelled. A
/// descriptor built by [`reload_current`](Self::reload_current) has
/// every field zero except `size`, which the OS reads as "keep the
/// adapter's current settings".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeDescriptor {
    /// Declared structure size (`dmSize`).
    pub size: u16,
    /// Bitmask of populated fields (`dmFields`).
    pub fields: u32,
    pub bits_per_pel: u32,
    pub pels_width: u32,
    pub pels_height: u32,
    pub display_frequency: u32,
}

impl ModeDescriptor {
    /// A zeroed descriptor carrying only its own size.
    pub fn reload_current() -> Self {
        Self {
            size: DEVMODE_SIZE,
            ..Self::default()
        }
    }

    /// Whether the size is the only populated field.
    pub fn is_reload_current(&self) -> bool {
        *self
            == Self {
                size: self.size,
                ..Self::default()
            }
            && self.size != 0
    }
}

// ── DisplayModeRequest ───────────────────────────────────────────

/// Parameters for one mode-reapplication call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModeRequest {
    /// Logical adapter path, e.g. `\\.\DISPLAY1`.
    pub target: String,
    pub descriptor: ModeDescriptor,
    /// `dwflags` passed to the mode change; always zero for a nudge.
    pub flags: u32,
}

impl DisplayModeRequest {
    /// Request that makes `target` reassert its existing configuration.
    pub fn reapply(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            descriptor: ModeDescriptor::reload_current(),
            flags: 0,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
