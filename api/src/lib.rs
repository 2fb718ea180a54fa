//! # FinTrack API
//!
//! HTTP surface of the FinTrack backend. Every request flows through the
//! same pipeline: validated extraction, the route handler, then either the
//! success envelope or the exception filter.

pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use error::{ApiError, ApiResult};
