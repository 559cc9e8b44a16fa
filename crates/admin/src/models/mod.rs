//! Domain models for the category server.
//!
//! Shared wire types live in `catalog-core`; this module holds the
//! server-only input and session types.

pub mod category;
pub mod session;

pub use category::{NewCategory, RawCategoryInput};
