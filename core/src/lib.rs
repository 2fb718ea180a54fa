//! # FinTrack Core
//!
//! Domain layer and request pipeline for the FinTrack backend: the
//! ledger entities and services, the failure model, the validation gate,
//! the exception normalizer and the response shaper.

pub mod domain;
pub mod errors;
pub mod pipeline;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::entities::{Category, CategoryKind, NewCategory, NewTransaction, Transaction};
pub use errors::{DomainError, DomainResult, Failure, FailureDescriptor, Fault};
pub use pipeline::{ExceptionNormalizer, FailureLogger, RequestInfo, ResponseShaper};
pub use repositories::{CategoryRepository, TransactionRepository};
pub use services::LedgerService;
pub use validation::{RequestSchema, Schema, ValidationGate};
