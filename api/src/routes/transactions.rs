//! Transaction endpoints

use actix_web::{web, HttpResponse};

use ft_core::repositories::{CategoryRepository, TransactionRepository};

use super::AppState;
use crate::dto::{CreateTransactionRequest, TransactionQuery, TransactionResponse};
use crate::error::ApiResult;
use crate::extract::Validated;

/// Handler for GET /api/v1/transactions
///
/// Optional `categoryId`, `from` and `to` query parameters narrow the list.
pub async fn list_transactions<C, T>(
    state: web::Data<AppState<C, T>>,
    query: web::Query<TransactionQuery>,
) -> ApiResult<web::Json<Vec<TransactionResponse>>>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    let filter = query.into_inner().into();
    let transactions = state.ledger.list_transactions(&filter).await?;
    Ok(web::Json(transactions.into_iter().map(Into::into).collect()))
}

/// Handler for POST /api/v1/transactions
///
/// # Request Body
///
/// ```json
/// {
///     "categoryId": "6f1c1f7e-2a4b-4d55-9b1a-3c0e2f9d7a10",
///     "amount": 42.5,
///     "occurredAt": "2026-03-01",
///     "tags": ["groceries"],
///     "splits": [
///         {"categoryId": "6f1c1f7e-2a4b-4d55-9b1a-3c0e2f9d7a10", "amount": 30},
///         {"categoryId": "0b6c3f8a-96f4-4c3e-8d0e-52d1f3f0c2aa", "amount": 12.5}
///     ]
/// }
/// ```
///
/// ## Errors
/// - `400 VALIDATION_FAILED` for schema violations
/// - `404 NOT_FOUND` when a referenced category does not exist
/// - `422 BUSINESS_RULE_VIOLATION` when the splits do not add up
pub async fn create_transaction<C, T>(
    state: web::Data<AppState<C, T>>,
    body: Validated<CreateTransactionRequest>,
) -> ApiResult<HttpResponse>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    let input = body.into_inner().into_new_transaction()?;
    let transaction = state.ledger.record_transaction(input).await?;
    Ok(HttpResponse::Created().json(TransactionResponse::from(transaction)))
}
