//! In-memory transaction store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Transaction, TransactionFilter};
use crate::errors::DomainError;

use super::trait_::TransactionRepository;

#[derive(Clone, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DomainError> {
        let transactions = self.transactions.read().await;
        let mut matching: Vec<Transaction> = transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(matching)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, DomainError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, transaction: Transaction) -> Result<Transaction, DomainError> {
        let mut transactions = self.transactions.write().await;

        if transactions.iter().any(|t| t.id == transaction.id) {
            return Err(DomainError::Conflict {
                message: format!("Transaction {} already exists", transaction.id),
            });
        }

        transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<usize, DomainError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().filter(|t| t.references(category_id)).count())
    }
}
