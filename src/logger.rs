//! Logging setup
//!
//! [`Logger`] keeps recent messages in memory and builds the `fern` dispatch
//! that routes `log` records to that buffer and, when logging is enabled, to a
//! log file under the platform data directory.

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    enabled: bool,
    level: LevelFilter,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// In-memory logger with file output disabled
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            enabled: false,
            level: LevelFilter::Info,
            log_file: None,
        }
    }

    /// Logger following the `[logging]` section
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut logger = Self::new();
        logger.level = config.level_filter()?;
        logger.enabled = config.enabled;
        if config.enabled {
            logger.log_file = Some(Self::get_log_file_path()?);
        }
        Ok(logger)
    }

    /// Write to `path` instead of the default log file
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        self.push(format!("[{}] {}", timestamp, message));
    }

    fn push(&self, entry: String) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.push(entry);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Default log file location under the platform data directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }

    /// Dispatch feeding records into this logger's buffer and log file
    ///
    /// A disabled logger filters everything out.
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let level = if self.enabled { self.level } else { LevelFilter::Off };
        let buffer = self.clone();

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {} {}: {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(fern::Output::call(move |record| buffer.push(record.args().to_string())));

        if let Some(path) = &self.log_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Install this logger as the global `log` backend
    pub fn install(&self) -> Result<()> {
        self.dispatch()?
            .apply()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
