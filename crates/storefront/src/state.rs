//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::snapshot::{FileSnapshotStore, SnapshotError};

/// Error building the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("cart store error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The single cart store sits
/// behind a mutex so each cart operation runs to completion, persistence
/// included, before the next one starts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create a new application state from already opened parts.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Load the catalog and open the file-backed cart store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file is invalid or the cart snapshot
    /// cannot be read.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StartupError> {
        let catalog = Catalog::load(config.catalog_path.as_deref())?;
        let snapshots = FileSnapshotStore::new(config.data_dir.clone());
        let cart = CartStore::open(catalog.clone(), snapshots)?;

        Ok(Self::new(config, catalog, cart))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the cart store.
    ///
    /// The guard must not be held across an `.await`. A poisoned lock is
    /// recovered: every store mutation persists before returning, so the
    /// cart left behind by a panicking holder is still consistent.
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the final cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn close(&self) -> Result<(), SnapshotError> {
        self.cart().flush()
    }
}
