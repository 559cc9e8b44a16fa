//! Category input handling.
//!
//! Request bodies are deserialized loosely into [`RawCategoryInput`] so that
//! type errors become field-keyed validation messages instead of a generic
//! JSON rejection. [`RawCategoryInput::validate`] turns that into a
//! [`NewCategory`] ready for the store.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use catalog_core::{CategoryInput, CategoryName, CategoryNameError, FieldErrors, Slug, fields};

/// Validation messages.
pub mod messages {
    pub const NAME_NOT_STRING: &str = "The name field must be a string.";
    pub const NAME_TAKEN: &str = "The name has already been taken.";
    pub const NAME_NO_SLUG: &str = "The name must contain at least one letter or number.";
    pub const DESCRIPTION_NOT_STRING: &str = "The description field must be a string.";
    pub const IS_ACTIVE_NOT_BOOLEAN: &str = "The is active field must be true or false.";
}

/// Validated category fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub description: Option<String>,
    pub is_active: bool,
}

impl NewCategory {
    /// Build from already-typed values, deriving the slug.
    #[must_use]
    pub fn new(name: CategoryName, description: Option<String>, is_active: bool) -> Self {
        let slug = Slug::from_name(&name);
        Self {
            name,
            slug,
            description,
            is_active,
        }
    }
}

/// Create/update body as received.
///
/// Each field distinguishes "absent" (`None`) from "present" (`Some`, which
/// may hold `Value::Null`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategoryInput {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub is_active: Option<Value>,
}

impl From<&CategoryInput> for RawCategoryInput {
    fn from(input: &CategoryInput) -> Self {
        Self {
            name: Some(Value::String(input.name.clone())),
            description: Some(
                input
                    .description
                    .clone()
                    .map_or(Value::Null, Value::String),
            ),
            is_active: Some(Value::Bool(input.is_active)),
        }
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RawCategoryInput {
    /// Check presence, types and lengths.
    ///
    /// Uniqueness is not checked here; it needs the store.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its first message.
    pub fn validate(&self) -> Result<NewCategory, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = match &self.name {
            None | Some(Value::Null) => {
                errors.add(fields::NAME, CategoryNameError::Empty.to_string());
                None
            }
            Some(Value::String(raw)) => match CategoryName::parse(raw) {
                Ok(name) => Some(name),
                Err(e) => {
                    errors.add(fields::NAME, e.to_string());
                    None
                }
            },
            Some(_) => {
                errors.add(fields::NAME, messages::NAME_NOT_STRING);
                None
            }
        };

        if name.as_ref().map(Slug::from_name).is_some_and(|slug| slug.is_empty()) {
            errors.add(fields::NAME, messages::NAME_NO_SLUG);
        }

        let description = match &self.description {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            Some(_) => {
                errors.add(fields::DESCRIPTION, messages::DESCRIPTION_NOT_STRING);
                None
            }
        };

        let is_active = match &self.is_active {
            None => Some(true),
            Some(value) => parse_boolean(value),
        };
        if is_active.is_none() {
            errors.add(fields::IS_ACTIVE, messages::IS_ACTIVE_NOT_BOOLEAN);
        }

        match (name, is_active) {
            (Some(name), Some(is_active)) if errors.is_empty() => {
                Ok(NewCategory::new(name, description, is_active))
            }
            _ => Err(errors),
        }
    }
}

/// Accepts `true`, `false`, `0`, `1`, `"0"` and `"1"`.
fn parse_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        },
        _ => None,
    }
}
