//! Transaction DTOs. Amounts travel as decimals and are stored in cents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ft_core::domain::entities::{
    to_cents, NewTransaction, Transaction, TransactionFilter, TransactionSplit,
};
use ft_core::validation::{FieldSpec, FieldType, ObjectSchema, RequestSchema, Rule, Schema};

use crate::error::ApiError;

/// Largest accepted amount
const MAX_AMOUNT: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    pub category_id: Uuid,
    pub amount: f64,
}

/// Body of `POST /api/v1/transactions`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub category_id: Uuid,
    pub amount: f64,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now
    pub occurred_at: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub splits: Vec<SplitRequest>,
}

fn split_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field(FieldSpec::string("categoryId").rule(Rule::IsUuid))
        .field(
            FieldSpec::number("amount")
                .rule(Rule::IsPositive)
                .rule(Rule::Max(MAX_AMOUNT)),
        )
}

impl RequestSchema for CreateTransactionRequest {
    fn schema() -> Schema {
        ObjectSchema::new()
            .field(FieldSpec::string("categoryId").rule(Rule::IsUuid))
            .field(
                FieldSpec::number("amount")
                    .rule(Rule::IsPositive)
                    .rule(Rule::Max(MAX_AMOUNT)),
            )
            .field(
                FieldSpec::string("occurredAt")
                    .optional()
                    .rule(Rule::IsDateString),
            )
            .field(
                FieldSpec::string("description")
                    .optional()
                    .rule(Rule::MaxLength(200)),
            )
            .field(
                FieldSpec::array("tags", FieldType::String)
                    .optional()
                    .rule(Rule::ArrayMaxSize(10)),
            )
            .field(
                FieldSpec::array("splits", FieldType::Object(split_schema()))
                    .optional()
                    .rule(Rule::ArrayMaxSize(20)),
            )
            .into()
    }
}

impl CreateTransactionRequest {
    pub fn into_new_transaction(self) -> Result<NewTransaction, ApiError> {
        let occurred_at = match self.occurred_at.as_deref() {
            Some(raw) => parse_occurred_at(raw)?,
            None => Utc::now(),
        };

        Ok(NewTransaction {
            category_id: self.category_id,
            amount_cents: to_cents(self.amount),
            description: self.description,
            occurred_at,
            tags: self.tags,
            splits: self
                .splits
                .into_iter()
                .map(|split| TransactionSplit {
                    category_id: split.category_id,
                    amount_cents: to_cents(split.amount),
                })
                .collect(),
        })
    }
}

fn parse_occurred_at(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ApiError::bad_request(format!("occurredAt '{}' is not a valid date", raw)))
}

/// Query string of `GET /api/v1/transactions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub category_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl From<TransactionQuery> for TransactionFilter {
    fn from(query: TransactionQuery) -> Self {
        TransactionFilter {
            category_id: query.category_id,
            from: query.from,
            to: query.to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResponse {
    pub category_id: Uuid,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: f64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub splits: Vec<SplitResponse>,
    pub created_at: DateTime<Utc>,
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            category_id: transaction.category_id,
            amount: from_cents(transaction.amount_cents),
            description: transaction.description,
            occurred_at: transaction.occurred_at,
            tags: transaction.tags,
            splits: transaction
                .splits
                .into_iter()
                .map(|split| SplitResponse {
                    category_id: split.category_id,
                    amount: from_cents(split.amount_cents),
                })
                .collect(),
            created_at: transaction.created_at,
        }
    }
}
