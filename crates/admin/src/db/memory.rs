//! In-process category store.
//!
//! Mirrors the `PostgreSQL` constraints (unique name, unique slug, restrict
//! delete while products reference a category) so the service layer behaves
//! the same against either backend. Names sort by byte order rather than by
//! database collation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use catalog_core::{ActiveCategory, Category, CategoryId, CategoryName, Slug};

use super::{CategoryStore, RepositoryError};
use crate::models::category::NewCategory;

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, i64>,
}

impl Tables {
    fn with_count(&self, category: &Category) -> Category {
        Category {
            products_count: self
                .products
                .get(&category.id.as_i32())
                .copied()
                .unwrap_or(0),
            ..category.clone()
        }
    }

    fn conflicts(&self, category: &NewCategory, except: Option<CategoryId>) -> Option<String> {
        self.categories
            .values()
            .filter(|existing| Some(existing.id) != except)
            .find_map(|existing| {
                if existing.name == category.name {
                    Some("categories_name_key".to_owned())
                } else if existing.slug == category.slug {
                    Some("categories_slug_key".to_owned())
                } else {
                    None
                }
            })
    }
}

/// Category store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    tables: RwLock<Tables>,
}

impl MemoryCategoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` additional products referencing `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the category does not exist,
    /// matching the foreign key on `products.category_id`.
    pub async fn attach_products(&self, id: CategoryId, count: i64) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id.as_i32()) {
            return Err(RepositoryError::Conflict(format!(
                "category {id} does not exist"
            )));
        }
        *tables.products.entry(id.as_i32()).or_insert(0) += count;
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .values()
            .map(|c| tables.with_count(c))
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_active(&self) -> Result<Vec<ActiveCategory>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut active: Vec<ActiveCategory> = tables
            .categories
            .values()
            .filter(|c| c.is_active)
            .map(ActiveCategory::from)
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .get(&id.as_i32())
            .map(|c| tables.with_count(c)))
    }

    async fn name_taken(
        &self,
        name: &CategoryName,
        except: Option<CategoryId>,
    ) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .any(|c| Some(c.id) != except && &c.name == name))
    }

    async fn slug_taken(
        &self,
        slug: &Slug,
        except: Option<CategoryId>,
    ) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .any(|c| Some(c.id) != except && &c.slug == slug))
    }

    async fn insert(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(constraint) = tables.conflicts(category, None) {
            return Err(RepositoryError::Conflict(constraint));
        }

        tables.next_id += 1;
        let now = Utc::now();
        let created = Category {
            id: CategoryId::new(tables.next_id),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            is_active: category.is_active,
            products_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(created.id.as_i32(), created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id.as_i32()) {
            return Ok(None);
        }
        if let Some(constraint) = tables.conflicts(category, Some(id)) {
            return Err(RepositoryError::Conflict(constraint));
        }

        let Some(existing) = tables.categories.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        existing.name = category.name.clone();
        existing.slug = category.slug.clone();
        existing.description.clone_from(&category.description);
        existing.is_active = category.is_active;
        existing.updated_at = Utc::now();

        let updated = existing.clone();
        Ok(Some(tables.with_count(&updated)))
    }

    async fn count_products(&self, id: CategoryId) -> Result<i64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id.as_i32()).copied().unwrap_or(0))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.products.get(&id.as_i32()).copied().unwrap_or(0) > 0 {
            return Err(RepositoryError::Conflict("category has products".to_owned()));
        }
        Ok(tables.categories.remove(&id.as_i32()).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory::new(CategoryName::parse(name).unwrap(), None, true)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryCategoryStore::new();
        let a = store.insert(&new_category("Toys")).await.unwrap();
        let b = store.insert(&new_category("Books")).await.unwrap();
        assert!(b.id.as_i32() > a.id.as_i32());
        assert_eq!(a.slug.as_str(), "toys");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let store = MemoryCategoryStore::new();
        store.insert(&new_category("Toys")).await.unwrap();
        store.insert(&new_category("Books")).await.unwrap();
        store.insert(&new_category("Home")).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name.into_inner())
            .collect();
        assert_eq!(names, ["Books", "Home", "Toys"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let store = MemoryCategoryStore::new();
        store.insert(&new_category("Toys")).await.unwrap();
        let result = store.insert(&new_category("Toys")).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_colliding_slug_is_conflict() {
        let store = MemoryCategoryStore::new();
        store.insert(&new_category("Toys!")).await.unwrap();
        let result = store.insert(&new_category("Toys?")).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_own_name() {
        let store = MemoryCategoryStore::new();
        let toys = store.insert(&new_category("Toys")).await.unwrap();
        let updated = store
            .update(toys.id, &new_category("Toys"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, toys.name);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryCategoryStore::new();
        let result = store
            .update(CategoryId::new(99), &new_category("Toys"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_restricted_by_products() {
        let store = MemoryCategoryStore::new();
        let toys = store.insert(&new_category("Toys")).await.unwrap();
        store.attach_products(toys.id, 2).await.unwrap();

        assert_eq!(store.count_products(toys.id).await.unwrap(), 2);
        assert!(matches!(
            store.delete(toys.id).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert_eq!(
            store.find(toys.id).await.unwrap().unwrap().products_count,
            2
        );
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = MemoryCategoryStore::new();
        assert!(!store.delete(CategoryId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_active_filters_inactive() {
        let store = MemoryCategoryStore::new();
        store.insert(&new_category("Toys")).await.unwrap();
        store
            .insert(&NewCategory::new(
                CategoryName::parse("Books").unwrap(),
                None,
                false,
            ))
            .await
            .unwrap();

        let active = store.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name.as_str(), "Toys");
    }
}
