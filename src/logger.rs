//! Structured logging module
//!
//! - Log levels (ERROR, WARN, INFO, DEBUG, TRACE)
//! - Structured JSON lines for production, human-readable lines for development
//! - Daily log file with size-based rotation
//! - Redaction of tokens and passwords in request payloads
//!
//! Logging is a no-op until [`init_global_logger`] has been called.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::config::LoggingConfig;

/// Log levels following RFC 5424
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub log_dir: Option<PathBuf>,
    pub log_to_stdout: bool,
    pub json_format: bool,
    pub max_file_size_mb: u64,
    pub max_log_files: u32,
}

impl From<&LoggingConfig> for LoggerConfig {
    fn from(cfg: &LoggingConfig) -> Self {
        Self {
            level: LogLevel::parse(&cfg.level),
            log_dir: cfg.log_dir.clone(),
            log_to_stdout: cfg.log_to_stdout,
            json_format: cfg.json_format,
            max_file_size_mb: cfg.max_file_size_mb,
            max_log_files: cfg.max_log_files,
        }
    }
}

struct LogFile {
    writer: BufWriter<File>,
    size: u64,
}

pub struct Logger {
    config: LoggerConfig,
    file: Mutex<Option<LogFile>>,
}

impl Logger {
    pub fn init(config: LoggerConfig) -> Result<Self, String> {
        let logger = Self {
            config,
            file: Mutex::new(None),
        };

        if let Some(dir) = &logger.config.log_dir {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create log directory: {}", e))?;
            logger.rotate_logs(dir)?;
        }

        Ok(logger)
    }

    fn log_file_path(dir: &Path) -> PathBuf {
        dir.join(format!("konter-admin-{}.log", Local::now().format("%Y-%m-%d")))
    }

    fn numbered_path(dir: &Path, n: u32) -> PathBuf {
        dir.join(format!(
            "konter-admin-{}.{}.log",
            Local::now().format("%Y-%m-%d"),
            n
        ))
    }

    /// Rotate today's log once it reaches the size limit, then (re)open it.
    fn rotate_logs(&self, dir: &Path) -> Result<(), String> {
        let log_path = Self::log_file_path(dir);
        let max_size = self.config.max_file_size_mb * 1024 * 1024;

        let current_size = std::fs::metadata(&log_path).map(|m| m.len()).unwrap_or(0);
        if current_size >= max_size && log_path.exists() {
            let oldest = Self::numbered_path(dir, self.config.max_log_files);
            let _ = std::fs::remove_file(&oldest);

            for i in (1..self.config.max_log_files).rev() {
                let old_path = Self::numbered_path(dir, i);
                if old_path.exists() {
                    let _ = std::fs::rename(&old_path, Self::numbered_path(dir, i + 1));
                }
            }
            let _ = std::fs::rename(&log_path, Self::numbered_path(dir, 1));
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| format!("Failed to open log file: {}", e))?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        let mut guard = self.file.lock().map_err(|e| e.to_string())?;
        *guard = Some(LogFile {
            writer: BufWriter::new(file),
            size,
        });

        Ok(())
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        if self.config.json_format {
            serde_json::to_string(entry).unwrap_or_else(|_| "{}".to_string())
        } else {
            format!(
                "{} [{}] [{}] {}{}{}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.target,
                entry.message,
                entry.data.as_ref().map(|d| format!(" | {}", d)).unwrap_or_default(),
                entry.error.as_ref().map(|e| format!(" | error: {}", e)).unwrap_or_default(),
            )
        }
    }

    pub fn write(&self, entry: &LogEntry) {
        if entry.level > self.config.level {
            return;
        }

        let line = self.format_line(entry);

        if self.config.log_to_stdout {
            match entry.level {
                LogLevel::Error | LogLevel::Warn => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }

        let needs_rotation = match self.file.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(file) => {
                    let _ = writeln!(file.writer, "{}", line);
                    let _ = file.writer.flush();
                    file.size += line.len() as u64 + 1;
                    file.size >= self.config.max_file_size_mb * 1024 * 1024
                }
                None => false,
            },
            Err(_) => false,
        };

        if needs_rotation {
            if let Some(dir) = &self.config.log_dir {
                let _ = self.rotate_logs(dir);
            }
        }
    }

    fn entry(level: LogLevel, target: &str, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level,
            target: target.to_string(),
            message: message.to_string(),
            data: None,
            error: None,
        }
    }

    pub fn error(&self, target: &str, message: &str, error: Option<&str>) {
        let mut entry = Self::entry(LogLevel::Error, target, message);
        entry.error = error.map(String::from);
        self.write(&entry);
    }

    pub fn warn(&self, target: &str, message: &str, data: Option<serde_json::Value>) {
        let mut entry = Self::entry(LogLevel::Warn, target, message);
        entry.data = data;
        self.write(&entry);
    }

    pub fn info(&self, target: &str, message: &str, data: Option<serde_json::Value>) {
        let mut entry = Self::entry(LogLevel::Info, target, message);
        entry.data = data;
        self.write(&entry);
    }

    pub fn debug(&self, target: &str, message: &str, data: Option<serde_json::Value>) {
        let mut entry = Self::entry(LogLevel::Debug, target, message);
        entry.data = data;
        self.write(&entry);
    }

    /// Log an outgoing API request. Credentials in the payload are redacted.
    pub fn request(&self, method: &str, path: &str, data: &serde_json::Value) {
        let mut entry = Self::entry(LogLevel::Debug, "API", &format!("{} {}", method, path));
        entry.data = Some(redact_sensitive_data(data.clone()));
        self.write(&entry);
    }
}

/// Redact sensitive fields from JSON
pub fn redact_sensitive_data(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(key, val)| {
                    let lower = key.to_lowercase();
                    if lower.contains("token")
                        || lower.contains("password")
                        || lower.contains("secret")
                        || lower.ends_with("key")
                    {
                        (key, serde_json::Value::String("***REDACTED***".to_string()))
                    } else {
                        (key, redact_sensitive_data(val))
                    }
                })
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(redact_sensitive_data).collect())
        }
        other => other,
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_global_logger(config: &LoggingConfig) -> Result<(), String> {
    let logger = Logger::init(LoggerConfig::from(config))?;

    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| "Logger already initialized".to_string())
}

pub fn get_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

#[macro_export]
macro_rules! log_error {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.error($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $err:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.error($target, $msg, Some($err.to_string().as_str()));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.warn($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.warn($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.info($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.info($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($target:expr, $msg:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.debug($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.debug($target, $msg, ::std::option::Option::Some($data));
        }
    };
}

#[macro_export]
macro_rules! log_request {
    ($method:expr, $path:expr, $data:expr) => {
        if let Some(l) = $crate::logger::get_logger() {
            l.request($method, $path, $data);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file_config(dir: &Path) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::Debug,
            log_dir: Some(dir.to_path_buf()),
            log_to_stdout: false,
            json_format: true,
            max_file_size_mb: 10,
            max_log_files: 3,
        }
    }

    #[test]
    fn redacts_nested_credentials() {
        let redacted = redact_sensitive_data(json!({
            "email": "admin@konter.id",
            "password": "Rahasia123",
            "session": { "token": "abc", "lokasi": "Pusat" },
            "items": [{ "apiKey": "x" }]
        }));

        assert_eq!(redacted["email"], "admin@konter.id");
        assert_eq!(redacted["password"], "***REDACTED***");
        assert_eq!(redacted["session"]["token"], "***REDACTED***");
        assert_eq!(redacted["session"]["lokasi"], "Pusat");
        assert_eq!(redacted["items"][0]["apiKey"], "***REDACTED***");
    }

    #[test]
    fn writes_json_lines_to_daily_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::init(file_config(dir.path())).unwrap();

        logger.info("CACHE", "invalidated", Some(json!({ "namespace": "vouchers" })));
        logger.request("POST", "/auth/login", &json!({ "password": "x" }));

        let content = std::fs::read_to_string(Logger::log_file_path(dir.path())).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["target"], "CACHE");
        assert_eq!(first["data"]["namespace"], "vouchers");
        assert!(lines[1].contains("***REDACTED***"));
    }

    #[test]
    fn entries_below_level_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = file_config(dir.path());
        config.level = LogLevel::Warn;
        let logger = Logger::init(config).unwrap();

        logger.debug("API", "GET /vouchers", None);
        logger.error("API", "request failed", Some("timeout"));

        let content = std::fs::read_to_string(Logger::log_file_path(dir.path())).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("request failed"));
    }
}
