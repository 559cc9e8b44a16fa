//! Category management service.
//!
//! Orders the checks for each mutation and turns storage-level constraint
//! violations into the same errors the application checks produce:
//!
//! - create/update: structure -> uniqueness -> existence -> persist
//! - delete: existence -> product count -> remove

use thiserror::Error;
use tracing::instrument;

use catalog_core::{ActiveCategory, Category, CategoryId, FieldErrors, fields};

use crate::db::{CategoryStore, RepositoryError};
use crate::models::category::{NewCategory, RawCategoryInput, messages};

/// User-facing outcome messages.
pub mod outcome {
    pub const CREATED: &str = "Category created successfully!";
    pub const UPDATED: &str = "Category updated successfully!";
    pub const DELETED: &str = "Category deleted successfully!";
    pub const HAS_PRODUCTS: &str =
        "Cannot delete the category because it has associated products.";
    pub const NOT_FOUND: &str = "Category not found.";
}

/// Errors that can occur during category operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Input failed validation; nothing was written.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// No category has this ID.
    #[error("category {0} not found")]
    NotFound(CategoryId),

    /// Delete refused because products still reference the category.
    #[error("category {id} has {products} associated products")]
    HasProducts {
        /// The category that was not deleted.
        id: CategoryId,
        /// Number of referencing products, if known.
        products: i64,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CategoryError {
    fn name_taken() -> Self {
        Self::Validation(FieldErrors::single(fields::NAME, messages::NAME_TAKEN))
    }
}

/// Category service.
pub struct CategoryService<'a> {
    store: &'a dyn CategoryStore,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service.
    #[must_use]
    pub const fn new(store: &'a dyn CategoryStore) -> Self {
        Self { store }
    }

    /// All categories with product counts, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::Repository` if the store fails.
    pub async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.store.list().await?)
    }

    /// Active categories for selection widgets.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::Repository` if the store fails.
    pub async fn list_active(&self) -> Result<Vec<ActiveCategory>, CategoryError> {
        Ok(self.store.list_active().await?)
    }

    /// Validate and create a category.
    ///
    /// # Errors
    ///
    /// - `CategoryError::Validation` if the input is invalid or the name is taken
    /// - `CategoryError::Repository` if the store fails
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &RawCategoryInput) -> Result<Category, CategoryError> {
        let category = input.validate().map_err(CategoryError::Validation)?;
        self.ensure_unique(&category, None).await?;

        let created = self.store.insert(&category).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => CategoryError::name_taken(),
            other => CategoryError::Repository(other),
        })?;

        tracing::info!(category_id = %created.id, name = %created.name, "Category created");
        Ok(created)
    }

    /// Validate and update a category.
    ///
    /// Uniqueness ignores the category being updated, so saving a record
    /// with its own current name succeeds.
    ///
    /// # Errors
    ///
    /// - `CategoryError::Validation` if the input is invalid or the name is taken
    /// - `CategoryError::NotFound` if no category has this ID
    /// - `CategoryError::Repository` if the store fails
    #[instrument(skip(self, id, input), fields(category_id = %id))]
    pub async fn update(
        &self,
        id: CategoryId,
        input: &RawCategoryInput,
    ) -> Result<Category, CategoryError> {
        let category = input.validate().map_err(CategoryError::Validation)?;
        self.ensure_unique(&category, Some(id)).await?;

        if self.store.find(id).await?.is_none() {
            return Err(CategoryError::NotFound(id));
        }

        let updated = self
            .store
            .update(id, &category)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CategoryError::name_taken(),
                other => CategoryError::Repository(other),
            })?
            .ok_or(CategoryError::NotFound(id))?;

        tracing::info!(name = %updated.name, "Category updated");
        Ok(updated)
    }

    /// Delete a category that no product references.
    ///
    /// # Errors
    ///
    /// - `CategoryError::NotFound` if no category has this ID
    /// - `CategoryError::HasProducts` if products reference the category
    /// - `CategoryError::Repository` if the store fails
    #[instrument(skip(self, id), fields(category_id = %id))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), CategoryError> {
        if self.store.find(id).await?.is_none() {
            return Err(CategoryError::NotFound(id));
        }

        let products = self.store.count_products(id).await?;
        if products > 0 {
            tracing::info!(products, "Category delete refused");
            return Err(CategoryError::HasProducts { id, products });
        }

        match self.store.delete(id).await {
            Ok(true) => {
                tracing::info!("Category deleted");
                Ok(())
            }
            Ok(false) => Err(CategoryError::NotFound(id)),
            Err(RepositoryError::Conflict(_)) => {
                Err(CategoryError::HasProducts { id, products: 0 })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ensure_unique(
        &self,
        category: &NewCategory,
        except: Option<CategoryId>,
    ) -> Result<(), CategoryError> {
        if self.store.name_taken(&category.name, except).await?
            || self.store.slug_taken(&category.slug, except).await?
        {
            return Err(CategoryError::name_taken());
        }
        Ok(())
    }
}
