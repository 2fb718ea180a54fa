//! Failure normalization and success shaping shared by every route.
//!
//! - `logging` - The failure log port and its in-memory recorder
//! - `normalizer` - Maps any failure onto the error envelope
//! - `shaper` - Wraps handler results in the success envelope

pub mod logging;
pub mod normalizer;
pub mod shaper;

pub use logging::{FailureLogger, LogContext, LogLevel, LogRecord, MemoryFailureLogger};
pub use normalizer::{
    render, ExceptionNormalizer, NormalizedFailure, RequestInfo, INTERNAL_ERROR_MESSAGE,
    NO_TRACE_PLACEHOLDER,
};
pub use shaper::ResponseShaper;

#[cfg(test)]
mod tests;
