//! Persistence interface for transactions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Transaction, TransactionFilter};
use crate::errors::DomainError;

/// Repository trait for transaction persistence
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Matching transactions, most recent `occurred_at` first
    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, DomainError>;

    async fn create(&self, transaction: Transaction) -> Result<Transaction, DomainError>;

    /// Number of transactions referencing the category, splits included
    async fn count_by_category(&self, category_id: Uuid) -> Result<usize, DomainError>;
}
