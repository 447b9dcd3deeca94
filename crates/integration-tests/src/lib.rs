//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! Each test starts the full storefront router on an ephemeral local port,
//! with its own temporary data directory, and drives it over HTTP.
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Page rendering, filter and sort fragments
//! - `storefront_cart` - Cart fragments, HTMX triggers, persistence

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::task::JoinHandle;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::routes::router;
use vitrine_storefront::state::AppState;

/// A storefront served on `127.0.0.1` for the duration of a test.
pub struct TestServer {
    /// Base URL, e.g. `http://127.0.0.1:49152`
    pub base_url: String,
    /// State shared with the running server.
    pub state: AppState,
    data_dir: TempDir,
    catalog_path: Option<PathBuf>,
    server: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront with the built-in catalog and an empty cart.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the listener cannot be created.
    pub async fn start() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");
        Self::start_in(data_dir, None).await
    }

    /// Start a storefront serving the products in `catalog_json`.
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be written or loaded.
    pub async fn with_catalog(catalog_json: &str) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");
        let catalog_path = data_dir.path().join("catalog.json");
        std::fs::write(&catalog_path, catalog_json).expect("Failed to write catalog");
        Self::start_in(data_dir, Some(catalog_path)).await
    }

    async fn start_in(data_dir: TempDir, catalog_path: Option<PathBuf>) -> Self {
        let config = StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_dir: data_dir.path().to_path_buf(),
            catalog_path: catalog_path.clone(),
            static_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
            ..StorefrontConfig::default()
        };
        let state = AppState::from_config(config).expect("Failed to build storefront state");

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = router(state.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            data_dir,
            catalog_path,
            server,
        }
    }

    /// Stop the server, write the final snapshot and start a fresh one on
    /// the same data directory.
    ///
    /// # Panics
    ///
    /// Panics if the final snapshot cannot be written.
    pub async fn restart(self) -> Self {
        self.server.abort();
        let _ = self.server.await;
        self.state.close().expect("Failed to write final snapshot");
        Self::start_in(self.data_dir, self.catalog_path).await
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Location of the cart snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir().join("cart.json")
    }

    /// The temporary data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }
}
