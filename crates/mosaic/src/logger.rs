//! File-based logging for Mosaic. Each run writes to
//! `~/.mosaic/logs/{run_id}/log` and mirrors every line to stderr.

use anyhow::{Context, Result};
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct MosaicLogger {
    level: LevelFilter,
    file: Arc<Mutex<File>>,
    run_id: String,
    log_path: PathBuf,
}

impl MosaicLogger {
    /// Create a logger writing below `logs_root`, in a directory named
    /// `{timestamp}_{uuid8}` for this run.
    pub fn new(level: LevelFilter, logs_root: &Path) -> Result<Self> {
        let run_id = Self::run_id();
        let log_dir = logs_root.join(&run_id);
        create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            level,
            file: Arc::new(Mutex::new(file)),
            run_id,
            log_path,
        })
    }

    fn run_id() -> String {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let uuid = Uuid::new_v4().simple().to_string();
        format!("{}_{}", timestamp, &uuid[..8])
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Install as the global logger, writing under `logs_root`.
    pub fn init(level: LevelFilter, logs_root: &Path) -> Result<()> {
        let logger = Self::new(level, logs_root)?;
        let run_id = logger.run_id.clone();
        let log_path = logger.log_path.clone();

        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;

        log::info!("Mosaic logger initialized. Run ID: {}", run_id);
        log::info!("Log file: {}", log_path.display());
        Ok(())
    }

    fn format(record: &Record) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{} {} [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for MosaicLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = Self::format(record);

        if let Ok(mut file) = self.file.lock() {
            // A failed log write must never take the app down
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
        }
        eprintln!("{}", message);
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
