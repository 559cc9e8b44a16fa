//! Session middleware configuration.
//!
//! Sessions hold the CSRF token and flash messages. Cookies are
//! `SameSite=Strict`, `HttpOnly`, and expire after 24 hours of inactivity.

use sqlx::PgPool;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::CatalogConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "catalog_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Arguments
///
/// * `pool` - `PostgreSQL` connection pool
/// * `config` - Server configuration (for determining HTTPS mode)
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (should never happen
/// with hardcoded "catalog" and "session" values).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &CatalogConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The session table is created by migration in the catalog schema.
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("catalog")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");

    with_cookie_settings(SessionManagerLayer::new(store), config)
}

/// Create the session layer with an in-process store.
#[must_use]
pub fn create_memory_session_layer(config: &CatalogConfig) -> SessionManagerLayer<MemoryStore> {
    with_cookie_settings(SessionManagerLayer::new(MemoryStore::default()), config)
}

fn with_cookie_settings<S: SessionStore>(
    layer: SessionManagerLayer<S>,
    config: &CatalogConfig,
) -> SessionManagerLayer<S> {
    layer
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
