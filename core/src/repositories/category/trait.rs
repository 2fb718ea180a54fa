//! Persistence interface for categories.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Category;
use crate::errors::DomainError;

/// Repository trait for category persistence
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name
    async fn list(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError>;

    /// Case-insensitive lookup by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;

    /// Store a new category.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - A category with the same name exists
    async fn create(&self, category: Category) -> Result<Category, DomainError>;

    /// Remove a category; returns whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
