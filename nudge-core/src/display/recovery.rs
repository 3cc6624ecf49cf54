//! Zero-attached decision and mode reapplication.
//!
//! A snapshot with at least one attached display is healthy and left
//! alone. A snapshot with none triggers exactly one
//! `apply_display_mode` call carrying a size-only descriptor. The
//! outcome is only logged; the next polling cycle is the retry.

use tracing::{error, info};

use crate::display::types::{DisplayModeRequest, InventorySnapshot};
use crate::platform::Platform;

/// What [`decide_and_act`] did. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// At least one display is attached; nothing was touched.
    Healthy { attached: usize },
    /// The mode change was issued and the OS accepted it.
    Reapplied { target: String },
    /// The mode change was issued and the OS rejected it.
    Failed { target: String, reason: String },
}

impl RecoveryOutcome {
    /// Whether a mode change was attempted.
    pub fn attempted(&self) -> bool {
        !matches!(self, RecoveryOutcome::Healthy { .. })
    }
}

/// Count attached displays and, if there are none, ask `target` to
/// reapply its current mode.
pub fn decide_and_act<P: Platform + ?Sized>(
    platform: &P,
    snapshot: &InventorySnapshot,
    target: &str,
) -> RecoveryOutcome {
    let attached = snapshot.attached_count();
    info!("Total: {attached} display(s) attached");

    if attached > 0 {
        return RecoveryOutcome::Healthy { attached };
    }

    let request = DisplayModeRequest::reapply(target);
    match platform.apply_display_mode(&request) {
        Ok(()) => {
            info!("Reapplied current display mode to {target} (default display)");
            RecoveryOutcome::Reapplied {
                target: request.target,
            }
        }
        Err(e) => {
            error!("Failed to reapply display mode to {target} (default display): {e}");
            RecoveryOutcome::Failed {
                target: request.target,
                reason: e.to_string(),
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;
    use crate::display::types::{DEFAULT_TARGET_ADAPTER, DisplayDeviceRecord};
    use crate::error::NudgeError;
    use crate::flags::DisplayStateFlags;
    use crate::platform::DeviceQuery;

    #[derive(Default)]
    struct Recorder {
        requests: RefCell<Vec<DisplayModeRequest>>,
        reject: bool,
    }

    impl Platform for Recorder {
        fn hide_main_window(&self) -> Result<(), NudgeError> {
            Ok(())
        }

        fn register_autostart(&self, _name: &str, _path: &Path) -> Result<(), NudgeError> {
            Ok(())
        }

        fn query_display_device(&self, _index: u32) -> DeviceQuery {
            DeviceQuery::EndOfList
        }

        fn apply_display_mode(&self, request: &DisplayModeRequest) -> Result<(), NudgeError> {
            self.requests.borrow_mut().push(request.clone());
            if self.reject {
                Err(NudgeError::win32("ChangeDisplaySettingsExW", -1))
            } else {
                Ok(())
            }
        }
    }

    fn snapshot(states: &[u32]) -> InventorySnapshot {
        states
            .iter()
            .enumerate()
            .map(|(i, &raw)| DisplayDeviceRecord {
                index: i as u32,
                name: format!(r"\\.\DISPLAY{}", i + 1),
                description: String::new(),
                device_id: String::new(),
                device_key: String::new(),
                state: DisplayStateFlags::from_raw(raw),
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn zero_attached_reapplies_once_with_size_only_descriptor() {
        let platform = Recorder::default();
        let outcome = decide_and_act(&platform, &snapshot(&[]), DEFAULT_TARGET_ADAPTER);

        assert!(matches!(outcome, RecoveryOutcome::Reapplied { .. }));
        let requests = platform.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, r"\\.\DISPLAY1");
        assert_eq!(requests[0].flags, 0);
        assert!(requests[0].descriptor.is_reload_current());
    }

    #[test]
    fn any_attached_display_means_no_action() {
        let platform = Recorder::default();
        let outcome = decide_and_act(&platform, &snapshot(&[0x1, 0x1 | 0x4]), DEFAULT_TARGET_ADAPTER);

        assert_eq!(outcome, RecoveryOutcome::Healthy { attached: 2 });
        assert!(!outcome.attempted());
        assert!(platform.requests.borrow().is_empty());
    }

    #[test]
    fn unattached_devices_do_not_count() {
        let platform = Recorder::default();
        let outcome = decide_and_act(&platform, &snapshot(&[0x4 | 0x20]), DEFAULT_TARGET_ADAPTER);

        assert!(outcome.attempted());
        assert_eq!(platform.requests.borrow().len(), 1);
    }

    #[test]
    fn rejected_mode_change_is_reported_not_raised() {
        let platform = Recorder {
            reject: true,
            ..Recorder::default()
        };
        let outcome = decide_and_act(&platform, &snapshot(&[0x0]), DEFAULT_TARGET_ADAPTER);

        match outcome {
            RecoveryOutcome::Failed { target, reason } => {
                assert_eq!(target, DEFAULT_TARGET_ADAPTER);
                assert!(reason.contains("ChangeDisplaySettingsExW"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn repeated_decisions_are_not_debounced() {
        let platform = Recorder::default();
        decide_and_act(&platform, &snapshot(&[]), DEFAULT_TARGET_ADAPTER);
        decide_and_act(&platform, &snapshot(&[]), DEFAULT_TARGET_ADAPTER);
        assert_eq!(platform.requests.borrow().len(), 2);
    }
}
