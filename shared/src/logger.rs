//! Dated-file logger, adapted from the teacher project's
//! `logic::logger::SimpleFileLogger`. The original registers its global
//! logger through a `static mut` plus `unsafe` blocks; this version gets
//! the same "leak it once, hand `log` a `'static` reference" effect through
//! `OnceLock`, which needs no `unsafe` at all.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

struct FileLogger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.to_level().unwrap_or(Level::Trace)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let ts = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let line = format!("{} [{}] {}: {}\n", ts, record.level(), record.target(), record.args());
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs a process-wide dated-file logger rooted at `log_root`, writing
/// to `log_root/YYYYMM/YYMMDD.log`, matching the teacher's path layout.
/// Safe to call more than once; only the first call installs the logger,
/// matching `log::set_logger`'s own "first caller wins" contract.
pub fn init_file_logger(log_root: impl Into<PathBuf>, level: LevelFilter) -> anyhow::Result<()> {
    let log_root = log_root.into();
    let month_dir = log_root.join(Local::now().format("%Y%m").to_string());
    fs::create_dir_all(&month_dir)?;
    let file_path = month_dir.join(Local::now().format("%y%m%d.log").to_string());

    let file = OpenOptions::new().create(true).append(true).open(&file_path)?;

    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| FileLogger { file: Mutex::new(file), level });
    log::set_max_level(level);
    let _ = log::set_logger(logger);
    Ok(())
}
