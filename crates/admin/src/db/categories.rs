//! `PostgreSQL` category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use catalog_core::{ActiveCategory, Category, CategoryId, CategoryName, Slug};

use super::{CategoryStore, RepositoryError};
use crate::models::category::NewCategory;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: CategoryName,
    slug: Slug,
    description: Option<String>,
    is_active: bool,
    products_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            is_active: row.is_active,
            products_count: row.products_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for the active-category projection.
#[derive(Debug, sqlx::FromRow)]
struct ActiveCategoryRow {
    id: i32,
    name: CategoryName,
    slug: Slug,
}

impl From<ActiveCategoryRow> for ActiveCategory {
    fn from(row: ActiveCategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: row.slug,
        }
    }
}

/// Map constraint violations to [`RepositoryError::Conflict`].
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(
                db_err
                    .constraint()
                    .unwrap_or("categories unique constraint")
                    .to_owned(),
            );
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::Conflict("category has products".to_owned());
        }
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_with_count(&self, id: i32) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT
                c.id, c.name, c.slug, c.description, c.is_active,
                (SELECT COUNT(*) FROM catalog.products p WHERE p.category_id = c.id) AS products_count,
                c.created_at, c.updated_at
            FROM catalog.categories c
            WHERE c.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT
                c.id, c.name, c.slug, c.description, c.is_active,
                COUNT(p.id) AS products_count,
                c.created_at, c.updated_at
            FROM catalog.categories c
            LEFT JOIN catalog.products p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_active(&self) -> Result<Vec<ActiveCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ActiveCategoryRow>(
            r"
            SELECT id, name, slug
            FROM catalog.categories
            WHERE is_active = TRUE
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        self.fetch_with_count(id.as_i32()).await
    }

    async fn name_taken(
        &self,
        name: &CategoryName,
        except: Option<CategoryId>,
    ) -> Result<bool, RepositoryError> {
        let taken: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS(
                SELECT 1 FROM catalog.categories
                WHERE name = $1 AND ($2::INT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(name)
        .bind(except.map(|id| id.as_i32()))
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn slug_taken(
        &self,
        slug: &Slug,
        except: Option<CategoryId>,
    ) -> Result<bool, RepositoryError> {
        let taken: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS(
                SELECT 1 FROM catalog.categories
                WHERE slug = $1 AND ($2::INT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(slug)
        .bind(except.map(|id| id.as_i32()))
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn insert(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO catalog.categories (name, slug, description, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING
                id, name, slug, description, is_active,
                0::BIGINT AS products_count,
                created_at, updated_at
            ",
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.description.as_deref())
        .bind(category.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE catalog.categories c
            SET name = $2, slug = $3, description = $4, is_active = $5, updated_at = NOW()
            WHERE c.id = $1
            RETURNING
                c.id, c.name, c.slug, c.description, c.is_active,
                (SELECT COUNT(*) FROM catalog.products p WHERE p.category_id = c.id) AS products_count,
                c.created_at, c.updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.description.as_deref())
        .bind(category.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(Into::into))
    }

    async fn count_products(&self, id: CategoryId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM catalog.products
            WHERE category_id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM catalog.categories
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }
}
