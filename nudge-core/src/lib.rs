//! # nudge-core
//!
//! Core library for display-nudge: a background monitor that polls the
//! attached display devices and, when none is attached, asks the first
//! display adapter to reapply its current mode.
//!
//! This crate contains:
//! - **Display**: `DisplayDeviceRecord`, `InventorySnapshot`, `DisplayModeRequest`,
//!   bounded enumeration and the zero-attached recovery decision
//! - **Platform**: the `Platform` capability trait and its Win32 adapter
//! - **Lock**: `SingleInstance` / `InstanceGuard` and the Win32 named mutex
//! - **Monitor**: the polling loop state machine
//! - **Log file**: timestamped append-only log sink as a `tracing` layer
//! - **Error**: `NudgeError` — typed, `thiserror`-based error enum

pub mod display;
pub mod error;
pub mod flags;
pub mod identity;
pub mod lock;
pub mod logfile;
pub mod monitor;
pub mod platform;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use display::{
    DEFAULT_MAX_ADAPTERS, DEFAULT_TARGET_ADAPTER, DisplayDeviceRecord, DisplayModeRequest,
    InventorySnapshot, ModeDescriptor, RecoveryOutcome, decide_and_act, enumerate_displays,
};
pub use error::NudgeError;
pub use flags::DisplayStateFlags;
pub use identity::AppIdentity;
pub use lock::{InstanceGuard, NamedMutex, SingleInstance};
pub use logfile::LogFile;
pub use monitor::{
    CycleReport, CycleState, LockScope, Monitor, MonitorConfig, Sleeper, ThreadSleeper,
};
pub use platform::{DeviceQuery, Platform, Win32Platform};
