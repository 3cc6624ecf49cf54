//! Timestamped, append-only log file.
//!
//! One file per process run, named
//! `<prefix>_<yyyy-MM-dd_HH-mm-ss>_logs.txt` with the timestamp fixed
//! the first time the file is used. Every line is
//! `<date> <time>: <message>`.
//!
//! The file is opened, appended to and closed for every line. No handle
//! is kept and nothing is buffered, so a killed process loses nothing
//! it already logged.
//!
//! [`LogFile::layer`] plugs the same sink into `tracing_subscriber` so
//! every `tracing` event reaching it becomes one line.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Local};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// File name for a log started at `at`.
pub fn file_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}_{}_logs.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// `<date> <time>: <message>`, without the trailing newline.
pub fn format_line(at: DateTime<Local>, message: &str) -> String {
    format!("{}: {message}", timestamp(at))
}

fn timestamp(at: DateTime<Local>) -> impl fmt::Display {
    at.format("%Y-%m-%d %H:%M:%S")
}

// ── LogFile ──────────────────────────────────────────────────────

/// Handle to the per-run log file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LogFile {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    directory: PathBuf,
    prefix: String,
    path: OnceLock<PathBuf>,
}

impl LogFile {
    /// Log file in `directory` (created on first write if missing).
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                directory: directory.into(),
                prefix: prefix.into(),
                path: OnceLock::new(),
            }),
        }
    }

    /// Full path of the file. The first call fixes the timestamp.
    pub fn path(&self) -> &Path {
        self.inner
            .path
            .get_or_init(|| self.inner.directory.join(file_name(&self.inner.prefix, Local::now())))
    }

    /// Append one `<date> <time>: <message>` line.
    pub fn append(&self, message: &str) -> io::Result<()> {
        let mut line = format_line(Local::now(), message);
        line.push('\n');
        self.append_raw(line.as_bytes())
    }

    /// A `tracing_subscriber` layer writing every event as one line.
    pub fn layer<S>(self) -> impl Layer<S> + Send + Sync + 'static
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat)
            .with_writer(self)
    }

    fn append_raw(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = self.open()?;
        file.write_all(bytes)
    }

    fn open(&self) -> io::Result<File> {
        let path = self.path();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }
}

// ── tracing integration ──────────────────────────────────────────

/// Writer handed out per event; every `write` is one open-append-close.
pub struct EventWriter<'a> {
    log: &'a LogFile,
}

impl Write for EventWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.append_raw(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = EventWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter { log: self }
    }
}

/// Event format producing `<date> <time>: <message>` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}: ", timestamp(Local::now()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, TimeZone};
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    fn read_lines(log: &LogFile) -> Vec<String> {
        std::fs::read_to_string(log.path())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn assert_timestamped(line: &str, message: &str) {
        let (stamp, rest) = line.split_at(19);
        NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(rest, format!(": {message}"));
    }

    #[test]
    fn file_name_embeds_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            file_name("displayNudge", at),
            "displayNudge_2024-03-07_09-05-01_logs.txt"
        );
    }

    #[test]
    fn line_is_date_time_message() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_line(at, "hello"), "2024-03-07 09:05:01: hello");
    }

    #[test]
    fn path_is_fixed_at_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path(), "displayNudge");
        let first = log.path().to_path_buf();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert_eq!(log.path(), first);
        assert_eq!(log.clone().path(), first);
    }

    #[test]
    fn append_adds_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path().join("nested"), "displayNudge");
        log.append("first").unwrap();
        log.append("second").unwrap();

        let lines = read_lines(&log);
        assert_eq!(lines.len(), 2);
        assert_timestamped(&lines[0], "first");
        assert_timestamped(&lines[1], "second");
    }

    #[test]
    fn tracing_events_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path(), "displayNudge");
        let subscriber = tracing_subscriber::registry().with(log.clone().layer());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Total: 0 display(s) attached");
            tracing::warn!("second event");
        });

        let lines = read_lines(&log);
        assert_eq!(lines.len(), 2);
        assert_timestamped(&lines[0], "Total: 0 display(s) attached");
        assert_timestamped(&lines[1], "second event");
    }
}
