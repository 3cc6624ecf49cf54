//! display-nudge — entry point.
//!
//! ```text
//! display-nudge        Poll forever (no arguments are accepted)
//! ```

use tracing::{info, warn};

use nudge_agent::config::AgentConfig;
use nudge_agent::logging;
use nudge_core::{AppIdentity, Monitor, NamedMutex, Win32Platform};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let identity = AppIdentity::current();

    // Load config.
    let (config, config_warning) = match &identity {
        Ok(id) => AgentConfig::load(&AgentConfig::beside(id.path())),
        Err(_) => (AgentConfig::default(), None),
    };

    // Init tracing.
    let log = logging::init(&config)?;

    info!("display-nudge v{}", env!("CARGO_PKG_VERSION"));
    info!("log file: {}", log.path().display());
    if let Some(w) = config_warning {
        warn!("{w}");
    }

    let lock = NamedMutex::new(config.instance.lock_name.clone());
    let mut monitor = Monitor::new(Win32Platform::new(), lock, config.to_monitor_config());

    match identity {
        Ok(id) => monitor = monitor.with_identity(id),
        Err(e) => warn!("cannot resolve executable path; auto-start disabled: {e}"),
    }

    monitor.run()
}
