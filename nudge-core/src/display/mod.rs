//! # Display inventory and recovery
//!
//! ```text
//! Platform::query_display_device(0..)   ──►  enumerate_displays  ──►  InventorySnapshot
//!                                                                          │
//! Platform::apply_display_mode(request) ◄──  decide_and_act  ◄─────────────┘
//! ```
//!
//! | Module      | Purpose                                             |
//! |-------------|-----------------------------------------------------|
//! | `types`     | Device records, snapshots and mode requests         |
//! | `inventory` | Bounded enumeration of every display device         |
//! | `recovery`  | Zero-attached decision and mode reapplication       |

pub mod inventory;
pub mod recovery;
pub mod types;

// ── Re-exports ───────────────────────────────────────────────────

pub use inventory::{DEFAULT_MAX_ADAPTERS, enumerate_displays};
pub use recovery::{RecoveryOutcome, decide_and_act};
pub use types::{
    DEFAULT_TARGET_ADAPTER, DEVMODE_SIZE, DisplayDeviceRecord, DisplayModeRequest,
    InventorySnapshot, ModeDescriptor,
};
