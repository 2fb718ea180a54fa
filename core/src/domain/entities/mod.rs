//! Ledger entities

pub mod category;
pub mod transaction;

pub use category::{Category, CategoryKind, NewCategory};
pub use transaction::{to_cents, NewTransaction, Transaction, TransactionFilter, TransactionSplit};
