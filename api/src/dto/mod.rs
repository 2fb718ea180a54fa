//! Request and response bodies

pub mod category;
pub mod transaction;

pub use category::CreateCategoryRequest;
pub use transaction::{
    CreateTransactionRequest, SplitRequest, TransactionQuery, TransactionResponse,
};
