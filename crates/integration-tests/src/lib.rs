//! Integration tests for the catalog server and client.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no database needed)
//! cargo test -p catalog-integration-tests
//!
//! # Tests against a running server
//! CATALOG_BASE_URL=http://localhost:3000 cargo test -p catalog-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `categories` - HTTP contract through the full middleware stack
//! - `client` - Page controller and form modal against a live listener
//! - `live_server` - Smoke tests against an externally started server

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use catalog_admin::{
    build_app, config::CatalogConfig, db::MemoryCategoryStore,
    middleware::create_memory_session_layer, state::AppState,
};

/// The application wired to an in-memory store.
#[must_use]
pub fn memory_app() -> (Router, Arc<MemoryCategoryStore>) {
    let config = CatalogConfig::memory();
    let store = Arc::new(MemoryCategoryStore::new());
    let session_layer = create_memory_session_layer(&config);
    let app = build_app(AppState::new(config, store.clone()), session_layer);
    (app, store)
}

/// A server listening on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryCategoryStore>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve [`memory_app`] in the background.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let (app, store) = memory_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read test listener address");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                report_stopped(&e);
            }
        });

        Self { addr, store }
    }

    /// Base URL with a trailing slash, ready for `Url::join`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

#[allow(clippy::print_stderr)]
fn report_stopped(e: &std::io::Error) {
    eprintln!("test server stopped: {e}");
}

/// Base URL of an externally started server (configurable via environment).
#[must_use]
pub fn live_base_url() -> String {
    std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "http://localhost:3000/".to_string())
}
