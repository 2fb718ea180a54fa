//! Category endpoints

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use ft_core::domain::entities::Category;
use ft_core::repositories::{CategoryRepository, TransactionRepository};

use super::AppState;
use crate::dto::CreateCategoryRequest;
use crate::error::ApiResult;
use crate::extract::Validated;

/// Handler for GET /api/v1/categories
pub async fn list_categories<C, T>(
    state: web::Data<AppState<C, T>>,
) -> ApiResult<web::Json<Vec<Category>>>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    let categories = state.ledger.list_categories().await?;
    Ok(web::Json(categories))
}

/// Handler for GET /api/v1/categories/{id}
pub async fn get_category<C, T>(
    state: web::Data<AppState<C, T>>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Category>>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    let category = state.ledger.get_category(path.into_inner()).await?;
    Ok(web::Json(category))
}

/// Handler for POST /api/v1/categories
///
/// Returns `201 Created` with the stored category.
pub async fn create_category<C, T>(
    state: web::Data<AppState<C, T>>,
    body: Validated<CreateCategoryRequest>,
) -> ApiResult<HttpResponse>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    let category = state.ledger.create_category(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// Handler for DELETE /api/v1/categories/{id}
///
/// Responds with `data: null`; categories still referenced by transactions
/// are rejected with `409 CONFLICT`.
pub async fn delete_category<C, T>(
    state: web::Data<AppState<C, T>>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse>
where
    C: CategoryRepository + 'static,
    T: TransactionRepository + 'static,
{
    state.ledger.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
