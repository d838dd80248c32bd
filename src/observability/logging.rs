//! Structured logging setup.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging settings derived from the process options.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub enabled: bool,
    pub debug: bool,
    /// Directory receiving the daily log files.
    pub log_dir: PathBuf,
}

impl LogSettings {
    pub fn new(enabled: bool, debug: bool, base_dir: &Path) -> Self {
        Self {
            enabled,
            debug,
            log_dir: base_dir.join("logs"),
        }
    }
}

/// Path of the log file for `date`.
pub fn log_file_path(log_dir: &Path, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("{}.log", date.format("%Y-%m-%d")))
}

/// Default filter directive for the given verbosity.
pub fn default_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("warn,server_manager={0},tower_http={0}", level)
}

/// File writer that switches to a new `<YYYY-MM-DD>.log` when the local date changes.
#[derive(Debug)]
pub struct DailyLogWriter {
    log_dir: PathBuf,
    active: Mutex<Option<ActiveFile>>,
}

#[derive(Debug)]
struct ActiveFile {
    date: NaiveDate,
    file: File,
}

impl DailyLogWriter {
    /// Create the log directory and open today's file.
    pub fn new(log_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let log_dir = log_dir.into();
        fs::create_dir_all(&log_dir)?;

        let date = chrono::Local::now().date_naive();
        let file = open_append(&log_file_path(&log_dir, date))?;

        Ok(Self {
            log_dir,
            active: Mutex::new(Some(ActiveFile { date, file })),
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Writer for records stamped with `date`, rolling the file if needed.
    ///
    /// If the new day's file cannot be opened, records are dropped until a
    /// later call succeeds.
    pub fn writer_for(&self, date: NaiveDate) -> DailyLogGuard<'_> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.as_ref().map(|a| a.date) != Some(date) {
            *active = open_append(&log_file_path(&self.log_dir, date))
                .ok()
                .map(|file| ActiveFile { date, file });
        }
        DailyLogGuard { active }
    }
}

impl<'a> MakeWriter<'a> for DailyLogWriter {
    type Writer = DailyLogGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer_for(chrono::Local::now().date_naive())
    }
}

/// Exclusive access to the current day's file for one log record.
pub struct DailyLogGuard<'a> {
    active: MutexGuard<'a, Option<ActiveFile>>,
}

impl Write for DailyLogGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.active.as_mut() {
            Some(active) => active.file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.active.as_mut() {
            Some(active) => active.file.flush(),
            None => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Does nothing when logging is disabled.
pub fn init(settings: &LogSettings) {
    if !settings.enabled {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings.debug)));

    let console = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false);

    let (file_layer, file_error) = match DailyLogWriter::new(&settings.log_dir) {
        Ok(writer) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            None,
        ),
        Err(e) => (None, Some(e)),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init();

    if installed.is_ok() {
        if let Some(e) = file_error {
            tracing::warn!(
                log_dir = %settings.log_dir.display(),
                error = %e,
                "Log file unavailable, logging to console only"
            );
        }
    }
}
