//! Category name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CategoryName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryNameError {
    /// The input is empty or whitespace-only.
    #[error("The name field is required.")]
    Empty,
    /// The trimmed input is too long.
    #[error("The name field must not be greater than {max} characters.")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A validated category name.
///
/// Surrounding whitespace is trimmed before validation and storage, so
/// `"  Toys "` and `"Toys"` are the same name. Comparison is case-sensitive.
///
/// ## Constraints
///
/// - Non-empty after trimming
/// - At most 255 characters (counted as Unicode scalar values, not bytes)
///
/// ## Examples
///
/// ```
/// use catalog_core::CategoryName;
///
/// assert_eq!(CategoryName::parse("  Toys ").unwrap().as_str(), "Toys");
/// assert!(CategoryName::parse("   ").is_err());
/// assert!(CategoryName::parse(&"x".repeat(256)).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Maximum length of a category name, in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `CategoryName` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, CategoryNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(CategoryNameError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(CategoryNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CategoryName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CategoryName {
    type Err = CategoryNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CategoryName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CategoryName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CategoryName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
