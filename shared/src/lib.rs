//! Shared utilities and common types for FinTrack server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error codes and field-level error structures
//! - Response envelopes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, Environment, LoggingConfig, ServerConfig, ValidationConfig,
};
pub use errors::{error_codes, ErrorCode, FailureMessage, FieldError};
pub use types::{
    ApiResponse, ErrorBody, ErrorEnvelope, HealthResponse, HealthStatus, ResponseBody,
    DEFAULT_SUCCESS_MESSAGE,
};
