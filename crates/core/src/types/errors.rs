//! Field-keyed validation errors.
//!
//! Create and update share this shape on the wire:
//!
//! ```json
//! { "errors": { "name": "The name has already been taken." } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Validation messages keyed by form field name.
///
/// One message per field; inserting a second message for the same field keeps
/// the first, so the earliest (most fundamental) failure is what users see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create an error map with a single field error.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record an error for `field` unless it already has one.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Remove the error for `field`, returning it if present.
    pub fn clear(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// Get the error message for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` if `field` has an error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns `true` if there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("name", "The name has already been taken.");
        assert_eq!(errors.get("name"), Some("The name field is required."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_clear_field() {
        let mut errors = FieldErrors::single("name", "required");
        errors.add("description", "must be a string");
        assert_eq!(errors.clear("name").as_deref(), Some("required"));
        assert!(!errors.contains("name"));
        assert!(errors.contains("description"));
        assert!(errors.clear("name").is_none());
    }

    #[test]
    fn test_wire_shape_is_flat_map() {
        let errors = FieldErrors::single("name", "The name has already been taken.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "The name has already been taken." })
        );
    }
}
