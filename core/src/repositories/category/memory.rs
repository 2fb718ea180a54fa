//! In-memory category store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Category;
use crate::errors::DomainError;

use super::trait_::CategoryRepository;

/// Category repository backed by a map; cheap to clone and share
#[derive(Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `categories`
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let map = categories.into_iter().map(|c| (c.id, c)).collect();
        Self {
            categories: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().await;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.has_name(name)).cloned())
    }

    async fn create(&self, category: Category) -> Result<Category, DomainError> {
        let mut categories = self.categories.write().await;

        if categories.values().any(|c| c.has_name(&category.name)) {
            return Err(DomainError::Conflict {
                message: format!("Category '{}' already exists", category.name.trim()),
            });
        }

        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(&id).is_some())
    }
}
