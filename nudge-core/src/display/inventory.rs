//! Bounded enumeration of every display device the OS reports.

use tracing::{debug, info, warn};

use crate::display::types::{DisplayDeviceRecord, InventorySnapshot};
use crate::platform::{DeviceQuery, Platform};

/// Default upper bound on enumerated indices.
pub const DEFAULT_MAX_ADAPTERS: u32 = 32;

/// Enumerate display devices from index 0 until the platform reports
/// end-of-list, two consecutive failures at the same index, or
/// `max_adapters` indices have been visited.
///
/// Every device is logged whether or not it is attached. An empty
/// snapshot is a normal result.
pub fn enumerate_displays<P: Platform + ?Sized>(
    platform: &P,
    max_adapters: u32,
) -> InventorySnapshot {
    let mut records = Vec::new();
    let mut index = 0;
    let mut failed_once = false;

    while index < max_adapters {
        match platform.query_display_device(index) {
            DeviceQuery::Device(record) => {
                let record = DisplayDeviceRecord { index, ..record };
                info!("{record}");
                records.push(record);
                index += 1;
                failed_once = false;
            }
            DeviceQuery::EndOfList => break,
            DeviceQuery::Failed(code) if !failed_once => {
                debug!("display query {index} failed ({code:#x}); retrying once");
                failed_once = true;
            }
            DeviceQuery::Failed(code) => {
                warn!("display query {index} failed twice ({code:#x}); stopping enumeration");
                break;
            }
        }
    }

    if index == max_adapters {
        warn!("display enumeration stopped at the {max_adapters}-adapter limit");
    }

    InventorySnapshot::new(records)
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::Path;

    use super::*;
    use crate::display::types::DisplayModeRequest;
    use crate::error::NudgeError;
    use crate::flags::DisplayStateFlags;

    /// Replays a scripted list of answers, then reports end-of-list.
    struct Scripted {
        answers: RefCell<VecDeque<DeviceQuery>>,
        asked: RefCell<Vec<u32>>,
    }

    impl Scripted {
        fn new(answers: Vec<DeviceQuery>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Platform for Scripted {
        fn hide_main_window(&self) -> Result<(), NudgeError> {
            Ok(())
        }

        fn register_autostart(&self, _name: &str, _path: &Path) -> Result<(), NudgeError> {
            Ok(())
        }

        fn query_display_device(&self, index: u32) -> DeviceQuery {
            self.asked.borrow_mut().push(index);
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(DeviceQuery::EndOfList)
        }

        fn apply_display_mode(&self, _request: &DisplayModeRequest) -> Result<(), NudgeError> {
            Ok(())
        }
    }

    fn device(name: &str, raw: u32) -> DeviceQuery {
        DeviceQuery::Device(DisplayDeviceRecord {
            index: 99,
            name: name.into(),
            description: String::new(),
            device_id: String::new(),
            device_key: String::new(),
            state: DisplayStateFlags::from_raw(raw),
        })
    }

    #[test]
    fn empty_enumeration_is_not_an_error() {
        let platform = Scripted::new(vec![]);
        let snap = enumerate_displays(&platform, DEFAULT_MAX_ADAPTERS);
        assert!(snap.is_empty());
        assert_eq!(*platform.asked.borrow(), vec![0]);
    }

    #[test]
    fn preserves_order_and_reassigns_indices() {
        let platform = Scripted::new(vec![device("A", 0x1), device("B", 0x0), device("C", 0x5)]);
        let snap = enumerate_displays(&platform, DEFAULT_MAX_ADAPTERS);

        let names: Vec<_> = snap.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        let indices: Vec<_> = snap.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(snap.attached_count(), 2);
    }

    #[test]
    fn single_failure_is_retried_at_same_index() {
        let platform = Scripted::new(vec![device("A", 0x1), DeviceQuery::Failed(5), device("B", 0x1)]);
        let snap = enumerate_displays(&platform, DEFAULT_MAX_ADAPTERS);

        assert_eq!(snap.len(), 2);
        assert_eq!(*platform.asked.borrow(), vec![0, 1, 1, 2]);
    }

    #[test]
    fn two_consecutive_failures_stop_enumeration() {
        let platform = Scripted::new(vec![
            device("A", 0x1),
            DeviceQuery::Failed(5),
            DeviceQuery::Failed(5),
            device("never", 0x1),
        ]);
        let snap = enumerate_displays(&platform, DEFAULT_MAX_ADAPTERS);

        assert_eq!(snap.len(), 1);
        assert_eq!(*platform.asked.borrow(), vec![0, 1, 1]);
    }

    #[test]
    fn stops_at_adapter_limit() {
        let platform = Scripted::new((0..10).map(|_| device("X", 0x1)).collect());
        let snap = enumerate_displays(&platform, 4);

        assert_eq!(snap.len(), 4);
        assert_eq!(*platform.asked.borrow(), vec![0, 1, 2, 3]);
    }
}
