//! Transaction entity. Amounts are stored in cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Convert a decimal amount to whole cents, rounding half away from zero
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Part of a transaction attributed to another category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSplit {
    pub category_id: Uuid,
    pub amount_cents: i64,
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub splits: Vec<TransactionSplit>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Every category the transaction touches, primary first
    pub fn category_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        std::iter::once(self.category_id).chain(self.splits.iter().map(|split| split.category_id))
    }

    pub fn references(&self, category_id: Uuid) -> bool {
        self.category_ids().any(|id| id == category_id)
    }
}

/// Input for recording a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub category_id: Uuid,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub splits: Vec<TransactionSplit>,
}

impl NewTransaction {
    pub fn new(category_id: Uuid, amount_cents: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            category_id,
            amount_cents,
            description: None,
            occurred_at,
            tags: Vec::new(),
            splits: Vec::new(),
        }
    }

    pub fn with_splits(mut self, splits: Vec<TransactionSplit>) -> Self {
        self.splits = splits;
        self
    }

    /// Total of the split amounts
    pub fn split_total(&self) -> i64 {
        self.splits.iter().map(|split| split.amount_cents).sum()
    }

    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            category_id: self.category_id,
            amount_cents: self.amount_cents,
            description: self.description,
            occurred_at: self.occurred_at,
            tags: self.tags,
            splits: self.splits,
            created_at: Utc::now(),
        }
    }
}

/// Listing filter; empty matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub category_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.category_id.map_or(true, |id| transaction.references(id))
            && self.from.map_or(true, |from| transaction.occurred_at >= from)
            && self.to.map_or(true, |to| transaction.occurred_at <= to)
    }
}
