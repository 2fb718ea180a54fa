//! Tests for failure and domain error types

#[cfg(test)]
mod failure_tests;
