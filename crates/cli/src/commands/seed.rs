//! Seed the default categories.
//!
//! Categories go through the same validation as the HTTP endpoints. A name
//! that is already taken is skipped, so the command can be re-run.

use catalog_admin::{
    db::{self, CategoryRepository, CategoryStore},
    models::RawCategoryInput,
    services::{CategoryError, CategoryService},
};
use catalog_core::{CategoryInput, fields};

use super::database_url;

/// Default categories as `(name, description)`.
pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Electronics", "Electronic devices and gadgets"),
    ("Clothing", "Clothing and accessories"),
    ("Home", "Home goods and decor"),
    ("Sports", "Sports and fitness equipment"),
    ("Books", "Books, magazines and reading material"),
    ("Toys", "Toys and games for children"),
    ("Food", "Food and beverages"),
    ("Beauty", "Beauty and personal care products"),
];

/// What a seeding run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Seed the configured database.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<SeedReport, Box<dyn std::error::Error>> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");

    let store = CategoryRepository::new(pool);
    Ok(seed(&store).await?)
}

/// Insert every default category missing from `store`.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn seed(store: &dyn CategoryStore) -> Result<SeedReport, CategoryError> {
    let service = CategoryService::new(store);
    let mut report = SeedReport::default();

    for (name, description) in DEFAULT_CATEGORIES {
        let input = CategoryInput {
            name: name.to_string(),
            description: Some(description.to_string()),
            is_active: true,
        };

        match service.create(&RawCategoryInput::from(&input)).await {
            Ok(category) => {
                tracing::info!(category_id = %category.id, slug = %category.slug, "Seeded category");
                report.inserted += 1;
            }
            Err(CategoryError::Validation(errors)) if errors.contains(fields::NAME) => {
                tracing::info!(name, "Category exists, skipping");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_admin::db::MemoryCategoryStore;

    use super::*;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryCategoryStore::new();

        let first = seed(&store).await.unwrap();
        assert_eq!(first.inserted, DEFAULT_CATEGORIES.len());
        assert_eq!(first.skipped, 0);

        let second = seed(&store).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, DEFAULT_CATEGORIES.len());

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), DEFAULT_CATEGORIES.len());
        assert!(listed.iter().all(|c| c.is_active));
    }
}
