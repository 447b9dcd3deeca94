//! CLI command implementations.

pub mod cart;
pub mod catalog;

use thiserror::Error;
use vitrine_storefront::catalog::CatalogError;
use vitrine_storefront::snapshot::SnapshotError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog file could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The cart snapshot could not be read or written.
    #[error("Cart storage error: {0}")]
    Snapshot(#[from] SnapshotError),
}
