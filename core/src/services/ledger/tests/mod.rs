//! Tests for the ledger service
