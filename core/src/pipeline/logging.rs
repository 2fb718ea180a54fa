//! Failure logging port.

use std::fmt;
use std::sync::Mutex;

use ft_shared::errors::ErrorCode;

/// Severity of a failure log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Severity for a reported failure: server errors are errors, plain bad
    /// requests and validation failures are informational, the rest warn
    pub fn for_failure(status_code: u16, code: &ErrorCode) -> Self {
        if status_code >= 500 {
            LogLevel::Error
        } else if status_code == 400 || *code == ErrorCode::ValidationFailed {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Structured fields attached to a failure log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub status_code: u16,
    pub code: ErrorCode,
    pub method: String,
    pub url: String,
    /// Diagnostic trace; only set for unrecognized faults
    pub trace: Option<String>,
}

/// Sink for the single log line emitted per failure
pub trait FailureLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext);
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
}

/// Logger that keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryFailureLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryFailureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureLogger for MemoryFailureLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        let record = LogRecord {
            level,
            message: message.to_string(),
            context: context.clone(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
