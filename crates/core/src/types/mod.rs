//! Core types for the category catalog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod errors;
pub mod id;
pub mod name;
pub mod slug;

pub use category::*;
pub use errors::FieldErrors;
pub use id::*;
pub use name::{CategoryName, CategoryNameError};
pub use slug::Slug;
