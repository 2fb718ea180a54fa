//! `log`-backed failure logger used by the server binary.

use ft_core::pipeline::{FailureLogger, LogContext, LogLevel};

/// Writes one line per failure through the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct LogFailureLogger {
    include_traces: bool,
}

impl LogFailureLogger {
    pub fn new(include_traces: bool) -> Self {
        Self { include_traces }
    }
}

impl Default for LogFailureLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FailureLogger for LogFailureLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) {
        let level = match level {
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        };

        match context.trace.as_deref().filter(|_| self.include_traces) {
            Some(trace) => log::log!(
                target: "ft_api::failures",
                level,
                "{} {} -> {} {}: {}\n{}",
                context.method,
                context.url,
                context.status_code,
                context.code,
                message,
                trace
            ),
            None => log::log!(
                target: "ft_api::failures",
                level,
                "{} {} -> {} {}: {}",
                context.method,
                context.url,
                context.status_code,
                context.code,
                message
            ),
        }
    }
}
