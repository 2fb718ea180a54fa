//! Business services containing domain logic and use cases.

pub mod ledger;

pub use ledger::LedgerService;
