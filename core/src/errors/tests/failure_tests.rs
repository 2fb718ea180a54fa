//! Unit tests for the failure model

use ft_shared::errors::{ErrorCode, FieldError};

use crate::errors::{DomainError, Failure, FailureDescriptor, Fault};

#[test]
fn test_resolved_code_prefers_explicit_code() {
    let descriptor = FailureDescriptor::new(404, "Budget missing").with_code("BUDGET_MISSING");
    assert_eq!(
        descriptor.resolved_code(),
        ErrorCode::Custom("BUDGET_MISSING".to_string())
    );
}

#[test]
fn test_resolved_code_falls_back_to_status_table() {
    assert_eq!(FailureDescriptor::from_status(401).resolved_code(), ErrorCode::AuthUnauthorized);
    assert_eq!(FailureDescriptor::from_status(418).resolved_code(), ErrorCode::InternalServerError);
}

#[test]
fn test_validation_failed_descriptor() {
    let errors = vec![FieldError::new("email", serde_json::json!("x"))
        .with_constraint("isEmail", "email must be an email")];
    let descriptor = FailureDescriptor::validation_failed(errors);

    assert_eq!(descriptor.status_code, 400);
    assert_eq!(descriptor.resolved_code(), ErrorCode::ValidationFailed);
    assert_eq!(descriptor.message.to_string(), "Validation failed");
    assert_eq!(descriptor.field_errors.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_well_formed_status_range() {
    assert!(FailureDescriptor::from_status(400).is_well_formed());
    assert!(FailureDescriptor::from_status(599).is_well_formed());
    assert!(!FailureDescriptor::from_status(200).is_well_formed());
    assert!(!FailureDescriptor::from_status(0).is_well_formed());
}

#[test]
fn test_domain_error_mapping() {
    let not_found: Failure = DomainError::not_found("Category").into();
    let descriptor = not_found.descriptor().unwrap();
    assert_eq!(descriptor.status_code, 404);
    assert_eq!(descriptor.message.to_string(), "Category not found");

    let conflict: Failure = DomainError::Conflict {
        message: "Category name already used".to_string(),
    }
    .into();
    assert_eq!(conflict.descriptor().unwrap().resolved_code().as_str(), "CONFLICT");

    let rule: Failure = DomainError::BusinessRule {
        message: "splits must add up".to_string(),
    }
    .into();
    assert_eq!(rule.descriptor().unwrap().status_code, 422);
}

#[test]
fn test_internal_domain_error_is_unrecognized() {
    let failure: Failure = DomainError::Internal {
        message: "lock poisoned".to_string(),
    }
    .into();
    assert_eq!(failure, Failure::Unrecognized(Fault::new("lock poisoned")));
}

#[test]
fn test_anyhow_errors_are_unrecognized() {
    let error = anyhow::anyhow!("socket closed").context("loading ledger");
    let failure: Failure = error.into();
    match failure {
        Failure::Unrecognized(fault) => {
            assert!(fault.detail.contains("loading ledger"));
            assert!(fault.detail.contains("socket closed"));
        }
        other => panic!("expected unrecognized fault, got {:?}", other),
    }
}

#[test]
fn test_fault_from_error_walks_sources() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let fault = Fault::from_error(&io);
    assert_eq!(fault.detail, "disk full");
    assert!(fault.trace.is_none());
}

#[test]
fn test_fault_from_panic_payloads() {
    let fault = Fault::from_panic(Box::new("called `Option::unwrap()` on a `None` value"));
    assert!(fault.detail.contains("Option::unwrap()"));

    let fault = Fault::from_panic(Box::new(String::from("index out of bounds")));
    assert!(fault.detail.contains("index out of bounds"));

    let fault = Fault::from_panic(Box::new(42_u8));
    assert_eq!(fault.detail, "handler panicked with a non-string payload");
}
