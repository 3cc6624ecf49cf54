//! Configuration for the display-nudge agent.
//!
//! No file is required: the defaults are the agent's fixed behaviour.
//! A `display-nudge.toml` next to the executable may override them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nudge_core::monitor::{LockScope, MonitorConfig};
use nudge_core::{DEFAULT_MAX_ADAPTERS, DEFAULT_TARGET_ADAPTER};

/// File name looked up beside the executable.
pub const CONFIG_FILE_NAME: &str = "display-nudge.toml";

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Polling and recovery settings.
    pub monitor: MonitorSection,
    /// Single-instance and auto-start settings.
    pub instance: InstanceSection,
    /// Logging settings.
    pub logging: LoggingSection,
}

/// Polling and recovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Seconds between polling cycles.
    pub poll_interval_secs: u64,
    /// Adapter that receives the mode reapplication.
    pub target_adapter: String,
    /// Upper bound on enumerated display indices.
    pub max_adapters: u32,
}

/// Single-instance and auto-start settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceSection {
    /// Name of the OS-visible mutex.
    pub lock_name: String,
    /// "process" holds the lock once won; "cycle" re-acquires every cycle.
    pub lock_scope: LockScopeSetting,
    /// Refresh the current user's run-at-login entry on every cycle.
    pub autostart: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockScopeSetting {
    #[default]
    Process,
    Cycle,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Log file name prefix.
    pub file_prefix: String,
    /// Directory for the log file. If empty, the working directory.
    pub directory: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            target_adapter: DEFAULT_TARGET_ADAPTER.into(),
            max_adapters: DEFAULT_MAX_ADAPTERS,
        }
    }
}

impl Default for InstanceSection {
    fn default() -> Self {
        Self {
            lock_name: "DisplayNudge".into(),
            lock_scope: LockScopeSetting::Process,
            autostart: true,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file_prefix: "displayNudge".into(),
            directory: String::new(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl AgentConfig {
    /// Path of the optional config file beside `exe`.
    pub fn beside(exe: &Path) -> PathBuf {
        exe.with_file_name(CONFIG_FILE_NAME)
    }

    /// Load configuration from a TOML file, falling back to defaults.
    ///
    /// Runs before tracing is initialised, so the fallback reason is
    /// returned for the caller to log.
    pub fn load(path: &Path) -> (Self, Option<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => (cfg, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("invalid config {}: {e}; using defaults", path.display())),
                ),
            },
            Err(_) => (Self::default(), None),
        }
    }

    /// Write the default configuration to a file (for bootstrapping).
    pub fn write_default(path: &Path) -> std::io::Result<()> {
        let text = toml::to_string_pretty(&Self::default()).map_err(std::io::Error::other)?;
        std::fs::write(path, text)
    }

    /// Convert into the core's `MonitorConfig`.
    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_secs(self.monitor.poll_interval_secs.max(1)),
            target_adapter: if self.monitor.target_adapter.trim().is_empty() {
                DEFAULT_TARGET_ADAPTER.into()
            } else {
                self.monitor.target_adapter.clone()
            },
            max_adapters: self.monitor.max_adapters.clamp(1, 256),
            lock_scope: match self.instance.lock_scope {
                LockScopeSetting::Process => LockScope::Process,
                LockScopeSetting::Cycle => LockScope::Cycle,
            },
            autostart: self.instance.autostart,
        }
    }

    /// Directory the log file is written to.
    pub fn log_directory(&self) -> PathBuf {
        if self.logging.directory.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.logging.directory)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
