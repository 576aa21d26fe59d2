use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::RwLock;
use std::time::{Duration, Instant};

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    CONSOLE_LOGGER.update_config(config.clone());

    if let Err(e) = log::set_logger(&*CONSOLE_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(config.min_level.to_level_filter());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub module: String,
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_module: bool,
    pub include_timestamp: bool,
    pub timestamp_format: String,
    /// One JSON object per line instead of the human-readable format.
    pub output_json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_module: true,
            include_timestamp: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn production() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_colors: true,
            output_json: false,
            ..Default::default()
        }
    }
}

/// `log` backend writing to stderr.
pub struct ConsoleLogger {
    config: RwLock<LoggerConfig>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            config: RwLock::new(LoggerConfig::default()),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.write() {
            *config = new_config;
        }
    }

    fn format_line(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        if config.output_json {
            return serde_json::to_string(entry).unwrap_or_default();
        }

        let mut output = String::new();

        if config.include_timestamp {
            let timestamp = entry.timestamp.format(&config.timestamp_format).to_string();
            if config.show_colors {
                output.push_str(&format!("{} ", timestamp.bright_black()));
            } else {
                output.push_str(&format!("{} ", timestamp));
            }
        }

        if config.show_colors {
            output.push_str(&format!(
                "[{}] ",
                entry.level.as_str().color(entry.level.color()).bold()
            ));
        } else {
            output.push_str(&format!("[{}] ", entry.level.as_str()));
        }

        if config.show_module && !entry.module.is_empty() {
            if config.show_colors {
                output.push_str(&format!("{}: ", entry.module.bright_blue()));
            } else {
                output.push_str(&format!("{}: ", entry.module));
            }
        }

        output.push_str(&entry.message);
        output
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.read() {
            Ok(config) => metadata.level() <= config.min_level.to_level_filter(),
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from_log_level(record.level()),
            message: record.args().to_string(),
            module: record.module_path().unwrap_or("unknown").to_string(),
        };

        if let Ok(config) = self.config.read() {
            eprintln!("{}", self.format_line(&entry, &config));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Logs the elapsed time of a scope at debug level when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!(
            "{} completed in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: impl Into<String>) -> Timer {
    Timer::new(name)
}
