//! Business logic services.
//!
//! # Services
//!
//! - `categories` - Category validation, uniqueness and delete rules

pub mod categories;

pub use categories::{CategoryError, CategoryService};
