//! Category persistence.
//!
//! # Database: schema `catalog`
//!
//! ## Tables
//!
//! - `categories` - Category records (`UNIQUE(name)`, `UNIQUE(slug)`)
//! - `products` - Product rows referencing a category (`ON DELETE RESTRICT`)
//! - `session` - tower-sessions storage
//!
//! # Backends
//!
//! Handlers talk to a [`CategoryStore`] trait object. Two implementations
//! exist: [`CategoryRepository`] (`PostgreSQL`) and [`MemoryCategoryStore`]
//! (process-local, used for local runs and tests).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p catalog-cli -- migrate
//! ```

pub mod categories;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use catalog_core::{ActiveCategory, Category, CategoryId, CategoryName, Slug};

use crate::models::category::NewCategory;

pub use categories::CategoryRepository;
pub use memory::MemoryCategoryStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (unique name/slug, or a product still references the row).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage operations for categories.
///
/// Implementations enforce the same constraints as the `PostgreSQL` schema:
/// unique `name`, unique `slug`, and no deletion while products reference the
/// category. Violations surface as [`RepositoryError::Conflict`].
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// All categories ordered by name, each with its product count.
    async fn list(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Active categories ordered by name.
    async fn list_active(&self) -> Result<Vec<ActiveCategory>, RepositoryError>;

    /// Look up a category by ID.
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    /// Whether `name` is used by a category other than `except`.
    async fn name_taken(
        &self,
        name: &CategoryName,
        except: Option<CategoryId>,
    ) -> Result<bool, RepositoryError>;

    /// Whether `slug` is used by a category other than `except`.
    async fn slug_taken(
        &self,
        slug: &Slug,
        except: Option<CategoryId>,
    ) -> Result<bool, RepositoryError>;

    /// Insert a new category.
    async fn insert(&self, category: &NewCategory) -> Result<Category, RepositoryError>;

    /// Overwrite the fields of an existing category.
    ///
    /// Returns `None` if no category has this ID.
    async fn update(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> Result<Option<Category>, RepositoryError>;

    /// Number of products referencing the category.
    async fn count_products(&self, id: CategoryId) -> Result<i64, RepositoryError>;

    /// Remove a category.
    ///
    /// Returns `true` if a row was removed, `false` if it didn't exist.
    async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
