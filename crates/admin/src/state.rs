//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::db::CategoryStore;
use crate::services::CategoryService;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    store: Arc<dyn CategoryStore>,
}

impl AppState {
    /// Build the state around a category store.
    #[must_use]
    pub fn new(config: CatalogConfig, store: Arc<dyn CategoryStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// The category store backing this server.
    #[must_use]
    pub fn store(&self) -> &dyn CategoryStore {
        self.inner.store.as_ref()
    }

    /// A category service over the configured store.
    #[must_use]
    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self.store())
    }
}
