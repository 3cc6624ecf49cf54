//! Tracing initialisation: the per-run log file plus stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use nudge_core::LogFile;

use crate::config::AgentConfig;

/// Install the global subscriber and return the log file handle.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init(config: &AgentConfig) -> Result<LogFile, Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log = LogFile::new(config.log_directory(), config.logging.file_prefix.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(log.clone().layer())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_events_to_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AgentConfig::default();
        config.logging.directory = dir.path().display().to_string();

        let log = init(&config).unwrap();
        tracing::error!("agent started");

        assert!(log.path().starts_with(dir.path()));
        let text = std::fs::read_to_string(log.path()).unwrap();
        assert!(text.lines().any(|l| l.ends_with(": agent started")));
    }
}
