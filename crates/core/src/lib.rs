//! Catalog Core - Shared category types.
//!
//! This crate provides the types used on both sides of the category HTTP contract:
//! - `admin` - Server that owns and validates category records
//! - `client` - Page controller and form modal that consume the endpoints
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Name validation and slug derivation live here so the
//! client can pre-validate with exactly the rules the server enforces.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, the validated category name, slugs, wire payloads
//!   and the field-keyed error map

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
