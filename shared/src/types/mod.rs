//! Type definitions shared between the API and core crates
//!
//! - `response` - Success/failure envelopes and health checks

pub mod response;

pub use response::{
    ApiResponse, ErrorBody, ErrorEnvelope, HealthResponse, HealthStatus, ResponseBody,
    ServiceHealth, DEFAULT_SUCCESS_MESSAGE,
};
