//! Ledger service implementation

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{
    Category, NewCategory, NewTransaction, Transaction, TransactionFilter,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CategoryRepository, TransactionRepository};

/// Owns the rules for categories and the transactions recorded against them.
///
/// Recording a transaction holds `references` for reading from the category
/// check until the insert; deleting a category holds it for writing across
/// the usage count and the delete. A transaction therefore never lands on a
/// category deleted mid-flight.
pub struct LedgerService<C, T>
where
    C: CategoryRepository,
    T: TransactionRepository,
{
    categories: Arc<C>,
    transactions: Arc<T>,
    references: RwLock<()>,
}

impl<C, T> LedgerService<C, T>
where
    C: CategoryRepository,
    T: TransactionRepository,
{
    pub fn new(categories: Arc<C>, transactions: Arc<T>) -> Self {
        Self {
            categories,
            transactions,
            references: RwLock::new(()),
        }
    }

    pub async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn get_category(&self, id: Uuid) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category"))
    }

    /// Create a category; names are unique regardless of case
    pub async fn create_category(&self, input: NewCategory) -> DomainResult<Category> {
        if self.categories.find_by_name(&input.name).await?.is_some() {
            return Err(DomainError::Conflict {
                message: format!("Category '{}' already exists", input.name.trim()),
            });
        }

        let category = self.categories.create(input.into()).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Delete a category that no transaction references
    pub async fn delete_category(&self, id: Uuid) -> DomainResult<()> {
        let _guard = self.references.write().await;
        let category = self.get_category(id).await?;

        let in_use = self.transactions.count_by_category(id).await?;
        if in_use > 0 {
            return Err(DomainError::Conflict {
                message: format!(
                    "Category '{}' is used by {} transaction(s)",
                    category.name, in_use
                ),
            });
        }

        if !self.categories.delete(id).await? {
            return Err(DomainError::not_found("Category"));
        }
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    pub async fn list_transactions(&self, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>> {
        self.transactions.list(filter).await
    }

    /// Record a transaction.
    ///
    /// Every referenced category must exist and, when splits are given, they
    /// must add up to the transaction amount.
    pub async fn record_transaction(&self, input: NewTransaction) -> DomainResult<Transaction> {
        if input.amount_cents <= 0 {
            return Err(DomainError::BusinessRule {
                message: "amount must be greater than zero".to_string(),
            });
        }

        let _guard = self.references.read().await;
        self.get_category(input.category_id).await?;
        for split in &input.splits {
            if split.amount_cents <= 0 {
                return Err(DomainError::BusinessRule {
                    message: "split amounts must be greater than zero".to_string(),
                });
            }
            self.get_category(split.category_id).await?;
        }

        if !input.splits.is_empty() && input.split_total() != input.amount_cents {
            return Err(DomainError::BusinessRule {
                message: format!(
                    "splits total {} but the transaction amount is {}",
                    format_cents(input.split_total()),
                    format_cents(input.amount_cents)
                ),
            });
        }

        let transaction = self.transactions.create(input.into_transaction()).await?;
        tracing::info!(
            transaction_id = %transaction.id,
            category_id = %transaction.category_id,
            amount_cents = transaction.amount_cents,
            "transaction recorded"
        );
        Ok(transaction)
    }
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents.abs() / 100, cents.abs() % 100)
}
