//! Debug log file
//!
//! With `--debug`, everything logged through the `log` macros by this crate
//! is appended to `<tmp>/splitview-debug.log`. Without it no logger is
//! installed and the macros are no-ops. The terminal belongs to the UI and
//! is never written to.

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use splitview::utils;

const TARGET_PREFIX: &str = "splitview";

struct FileLogger {
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies (reqwest, hyper, ...) are noisy at debug level
        metadata.target().starts_with(TARGET_PREFIX)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger when debug mode is on
pub fn init(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let path = utils::get_debug_log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open debug log {}", path.display()))?;

    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
    }))
    .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(LevelFilter::Debug);

    log::info!("Debug logging to {}", path.display());
    Ok(())
}
