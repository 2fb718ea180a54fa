//! Category and transaction bookkeeping

mod service;

#[cfg(test)]
mod tests;

pub use service::LedgerService;
