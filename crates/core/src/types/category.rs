//! Category entity and the JSON payloads exchanged with the category endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::FieldErrors;
use super::id::CategoryId;
use super::name::CategoryName;
use super::slug::Slug;

/// Form field names, as used for keys in [`FieldErrors`].
pub mod fields {
    /// The category name field.
    pub const NAME: &str = "name";
    /// The category description field.
    pub const DESCRIPTION: &str = "description";
    /// The active flag field.
    pub const IS_ACTIVE: &str = "is_active";
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned ID.
    pub id: CategoryId,
    /// Unique display name.
    pub name: CategoryName,
    /// Slug derived from `name`.
    pub slug: Slug,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Whether the category is offered in selection widgets.
    pub is_active: bool,
    /// Number of products referencing this category.
    #[serde(default)]
    pub products_count: i64,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Placeholder shown in listings when there is no description.
    pub const EMPTY_DESCRIPTION: &'static str = "-";

    /// Status badge text.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }

    /// CSS class for the status badge.
    #[must_use]
    pub const fn status_class(&self) -> &'static str {
        if self.is_active {
            "badge-success"
        } else {
            "badge-muted"
        }
    }

    /// Description for display, or [`Self::EMPTY_DESCRIPTION`].
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(Self::EMPTY_DESCRIPTION)
    }

    /// Whether the category can be deleted without a conflict.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        self.products_count == 0
    }
}

/// Reduced projection of an active category for select widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCategory {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
}

impl From<&Category> for ActiveCategory {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

/// Body sent by the form modal for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Successful create/update response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub message: String,
    pub category: Category,
}

/// Response carrying only a human-readable message (delete, not found, conflict).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 422 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: FieldErrors,
}

/// Outcome flavour of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    /// A success flash.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// An error flash.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Page payload for `GET /categories` when JSON is requested.
///
/// Carries everything the client page controller needs to start: the list,
/// the CSRF token for subsequent mutations, and any pending flash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesPage {
    pub categories: Vec<Category>,
    pub csrf_token: String,
    pub flash: Option<Flash>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_json_shape() {
        let json = serde_json::json!({
            "id": 5,
            "name": "Toys",
            "slug": "toys",
            "description": null,
            "is_active": true,
            "products_count": 2,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z"
        });

        let category: Category = serde_json::from_value(json).unwrap();
        assert_eq!(category.id, CategoryId::new(5));
        assert_eq!(category.name.as_str(), "Toys");
        assert_eq!(category.slug.as_str(), "toys");
        assert!(category.description.is_none());
        assert_eq!(category.products_count, 2);
    }

    #[test]
    fn test_products_count_defaults_to_zero() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Books",
            "slug": "books",
            "description": "Novels",
            "is_active": false,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        });

        let category: Category = serde_json::from_value(json).unwrap();
        assert_eq!(category.products_count, 0);
    }

    #[test]
    fn test_view_helpers() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Books",
            "slug": "books",
            "description": null,
            "is_active": false,
            "products_count": 3,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        });
        let mut category: Category = serde_json::from_value(json).unwrap();

        assert_eq!(category.status_label(), "Inactive");
        assert_eq!(category.display_description(), "-");
        assert!(!category.is_deletable());

        category.is_active = true;
        category.description = Some("Novels".to_string());
        assert_eq!(category.status_label(), "Active");
        assert_eq!(category.status_class(), "badge-success");
        assert_eq!(category.display_description(), "Novels");
    }

    #[test]
    fn test_flash_kind_serializes_snake_case() {
        let json = serde_json::to_value(Flash::error("nope")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], "nope");
    }
}
