//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Redirect to /categories
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (store ping)
//!
//! # Categories
//! GET    /categories          - Category page (HTML, or JSON page payload)
//! POST   /categories          - Create category
//! GET    /categories/active   - Active categories for select widgets
//! PUT    /categories/{id}     - Update category
//! DELETE /categories/{id}     - Delete category
//! ```

pub mod categories;
pub mod health;

use axum::{Router, response::Redirect, routing::get};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(categories::CATEGORIES_PATH) }))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(categories::router())
}
