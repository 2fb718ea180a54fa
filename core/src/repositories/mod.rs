pub mod category;
pub mod transaction;

pub use category::{CategoryRepository, InMemoryCategoryRepository};
pub use transaction::{InMemoryTransactionRepository, TransactionRepository};
