//! Tests for the validation gate
