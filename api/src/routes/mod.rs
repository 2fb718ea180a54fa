//! Route handlers mounted under `/api/v1`

pub mod categories;
pub mod health;
pub mod transactions;

use std::sync::Arc;

use ft_core::repositories::{CategoryRepository, TransactionRepository};
use ft_core::services::LedgerService;

/// Application state that holds shared services
pub struct AppState<C, T>
where
    C: CategoryRepository,
    T: TransactionRepository,
{
    pub ledger: Arc<LedgerService<C, T>>,
}

impl<C, T> AppState<C, T>
where
    C: CategoryRepository,
    T: TransactionRepository,
{
    pub fn new(categories: Arc<C>, transactions: Arc<T>) -> Self {
        Self {
            ledger: Arc::new(LedgerService::new(categories, transactions)),
        }
    }
}
