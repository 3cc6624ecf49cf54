//! The polling loop.
//!
//! ```text
//! AcquiringLock ──► Active ─────────┐
//!       │                           ▼
//!       └─────► AlreadyRunning ──► Sleeping ──► AcquiringLock ──► …
//! ```
//!
//! An active cycle hides the main window, refreshes the auto-start
//! entry, enumerates displays and runs the recovery decision. Every
//! failure along the way is logged and absorbed; the loop itself never
//! returns.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::display::inventory::{DEFAULT_MAX_ADAPTERS, enumerate_displays};
use crate::display::recovery::{RecoveryOutcome, decide_and_act};
use crate::display::types::DEFAULT_TARGET_ADAPTER;
use crate::identity::AppIdentity;
use crate::lock::{InstanceGuard, SingleInstance};
use crate::platform::Platform;

// ── MonitorConfig ────────────────────────────────────────────────

/// How long the single-instance lock is held once won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockScope {
    /// Keep the lock for the life of the loop.
    #[default]
    Process,
    /// Release at the end of every cycle and re-acquire on the next.
    Cycle,
}

/// Configuration for [`Monitor`].
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between cycles.
    pub poll_interval: Duration,
    /// Adapter that receives the mode reapplication.
    pub target_adapter: String,
    /// Upper bound on enumerated display indices.
    pub max_adapters: u32,
    pub lock_scope: LockScope,
    /// Refresh the run-at-login entry on every active cycle.
    pub autostart: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            target_adapter: DEFAULT_TARGET_ADAPTER.into(),
            max_adapters: DEFAULT_MAX_ADAPTERS,
            lock_scope: LockScope::Process,
            autostart: true,
        }
    }
}

// ── Sleeper ──────────────────────────────────────────────────────

/// The only suspension point of the loop.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// ── CycleReport ──────────────────────────────────────────────────

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// This process held the lock and did the work.
    Active,
    /// Another instance holds the lock.
    AlreadyRunning,
    /// The lock could not be created at all.
    LockUnavailable,
    /// The work panicked; the fault was contained.
    Faulted,
}

/// Result of one [`Monitor::run_cycle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub state: CycleState,
    /// Recovery outcome, present for [`CycleState::Active`] only.
    pub outcome: Option<RecoveryOutcome>,
}

impl CycleReport {
    fn skipped(state: CycleState) -> Self {
        Self {
            state,
            outcome: None,
        }
    }
}

// ── Monitor ──────────────────────────────────────────────────────

/// Drives inventory and recovery on a fixed interval under the
/// single-instance lock.
pub struct Monitor<P, L, S = ThreadSleeper> {
    platform: P,
    lock: L,
    sleeper: S,
    config: MonitorConfig,
    identity: Option<AppIdentity>,
    held: Option<InstanceGuard>,
}

impl<P, L> Monitor<P, L, ThreadSleeper>
where
    P: Platform,
    L: SingleInstance,
{
    pub fn new(platform: P, lock: L, config: MonitorConfig) -> Self {
        Self {
            platform,
            lock,
            sleeper: ThreadSleeper,
            config,
            identity: None,
            held: None,
        }
    }
}

impl<P, L, S> Monitor<P, L, S>
where
    P: Platform,
    L: SingleInstance,
    S: Sleeper,
{
    /// Replace the sleep implementation.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> Monitor<P, L, S2> {
        Monitor {
            platform: self.platform,
            lock: self.lock,
            sleeper,
            config: self.config,
            identity: self.identity,
            held: self.held,
        }
    }

    /// Identity registered for auto-start. Without one, registration
    /// is skipped.
    pub fn with_identity(mut self, identity: AppIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Whether this monitor currently owns the single-instance lock.
    pub fn holds_lock(&self) -> bool {
        self.held.is_some()
    }

    /// Poll forever.
    pub fn run(&mut self) -> ! {
        self.log_start();
        loop {
            self.run_cycle();
            self.sleeper.sleep(self.config.poll_interval);
        }
    }

    /// Run `cycles` cycles, sleeping after each one.
    pub fn run_cycles(&mut self, cycles: usize) -> Vec<CycleReport> {
        self.log_start();
        (0..cycles)
            .map(|_| {
                let report = self.run_cycle();
                self.sleeper.sleep(self.config.poll_interval);
                report
            })
            .collect()
    }

    /// One lock attempt plus, if it succeeds, the cycle's work.
    pub fn run_cycle(&mut self) -> CycleReport {
        if self.held.is_none() {
            match self.lock.try_acquire() {
                Ok(Some(guard)) => self.held = Some(guard),
                Ok(None) => {
                    info!("Application instance is already running");
                    return CycleReport::skipped(CycleState::AlreadyRunning);
                }
                Err(e) => {
                    error!("single-instance lock unavailable: {e}");
                    return CycleReport::skipped(CycleState::LockUnavailable);
                }
            }
        }

        let work = panic::catch_unwind(AssertUnwindSafe(|| self.active_work()));

        if self.config.lock_scope == LockScope::Cycle {
            self.held = None;
        }

        match work {
            Ok(outcome) => {
                debug!("cycle finished");
                CycleReport {
                    state: CycleState::Active,
                    outcome: Some(outcome),
                }
            }
            Err(_) => {
                error!("cycle aborted by an unexpected fault; continuing");
                CycleReport::skipped(CycleState::Faulted)
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────

    fn active_work(&self) -> RecoveryOutcome {
        if let Err(e) = self.platform.hide_main_window() {
            warn!("could not hide main window: {e}");
        }

        if self.config.autostart {
            match &self.identity {
                Some(id) => {
                    if let Err(e) = self.platform.register_autostart(id.name(), id.path()) {
                        warn!("could not register auto-start for {}: {e}", id.name());
                    }
                }
                None => debug!("no application identity; auto-start not registered"),
            }
        }

        let snapshot = enumerate_displays(&self.platform, self.config.max_adapters);
        decide_and_act(&self.platform, &snapshot, &self.config.target_adapter)
    }

    fn log_start(&self) {
        info!(
            "Application is running (target {}, every {}s, lock held per {})",
            self.config.target_adapter,
            self.config.poll_interval.as_secs(),
            match self.config.lock_scope {
                LockScope::Process => "process",
                LockScope::Cycle => "cycle",
            }
        );
    }
}

// ── Tests ────────────────────────────────────────────────────────
