//! Persistent cart store.
//!
//! [`CartStore`] owns the shopper's [`Cart`] and keeps a full JSON snapshot of
//! it under [`CART_SNAPSHOT_KEY`] in a [`SnapshotStore`]. The snapshot is
//! rewritten after every mutation that changes the cart.
//!
//! Lookup misses (an unknown product id, a line index past the end) leave the
//! cart untouched and write nothing. Callers derive ids and indices from the
//! state they last rendered, so a miss only happens on a stale page.
//!
//! A mutation whose snapshot write fails is rolled back, so the in-memory
//! cart never runs ahead of its snapshot.

use vitrine_core::cart::QuantityChange;
use vitrine_core::{Cart, CartEntry, CartTotals, ProductId};

use crate::catalog::Catalog;
use crate::presentation::Presenter;
use crate::snapshot::{SnapshotError, SnapshotStore};

/// Key of the cart snapshot.
pub const CART_SNAPSHOT_KEY: &str = "cart";

/// The shopper's cart plus its persistence.
pub struct CartStore {
    catalog: Catalog,
    cart: Cart,
    snapshots: Box<dyn SnapshotStore>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("catalog_len", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the store, restoring the cart from its snapshot when one exists.
    ///
    /// A snapshot that does not decode as a list of cart entries is logged
    /// and ignored; the cart starts empty and the next mutation replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot storage cannot be read.
    pub fn open(
        catalog: Catalog,
        snapshots: impl SnapshotStore + 'static,
    ) -> Result<Self, SnapshotError> {
        let cart = match snapshots.load(CART_SNAPSHOT_KEY)? {
            Some(snapshot) => Cart::from_snapshot(&snapshot).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring unreadable cart snapshot");
                Cart::new()
            }),
            None => Cart::new(),
        };

        tracing::info!(
            lines = cart.len(),
            items = cart.totals().quantity,
            "Cart store opened"
        );

        Ok(Self {
            catalog,
            cart,
            snapshots: Box::new(snapshots),
        })
    }

    /// Write a final snapshot and release the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn close(self) -> Result<(), SnapshotError> {
        self.flush()
    }

    /// Write the current cart to its snapshot.
    ///
    /// An empty cart writes nothing, so a cleared cart stays without a
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn flush(&self) -> Result<(), SnapshotError> {
        if self.cart.is_empty() {
            return Ok(());
        }
        self.persist()
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart lines in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<&CartEntry> {
        self.cart.entries().collect()
    }

    /// Item count and total price.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Add one unit of the product `id`.
    ///
    /// Returns `true` if the cart changed; an id missing from the catalog is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<bool, SnapshotError> {
        let Some(product) = self.catalog.find(id) else {
            tracing::debug!(%id, "Add to cart ignored: unknown product");
            return Ok(false);
        };

        let previous = self.cart.clone();
        let quantity = self.cart.add(product);
        tracing::debug!(%id, quantity, "Added to cart");
        self.commit(previous)?;
        Ok(true)
    }

    /// Remove the line at display position `index`.
    ///
    /// Returns `true` if the cart changed; an out-of-range index is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn remove_from_cart(&mut self, index: usize) -> Result<bool, SnapshotError> {
        let previous = self.cart.clone();
        let Some(removed) = self.cart.remove_at(index) else {
            tracing::debug!(index, "Remove ignored: no such cart line");
            return Ok(false);
        };

        tracing::debug!(id = %removed.id(), index, "Removed from cart");
        self.commit(previous)?;
        Ok(true)
    }

    /// Add `delta` to the quantity of the line at `index`, removing the line
    /// when its quantity drops to zero or below.
    ///
    /// Returns `true` if the cart changed; an out-of-range index is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn change_qty(&mut self, index: usize, delta: i32) -> Result<bool, SnapshotError> {
        let previous = self.cart.clone();
        match self.cart.change_quantity_at(index, delta) {
            None => {
                tracing::debug!(index, delta, "Quantity change ignored: no such cart line");
                return Ok(false);
            }
            Some(QuantityChange::Updated(quantity)) => {
                tracing::debug!(index, delta, quantity, "Cart quantity changed");
            }
            Some(QuantityChange::Removed) => {
                tracing::debug!(index, delta, "Cart line removed by quantity change");
            }
        }

        self.commit(previous)?;
        Ok(true)
    }

    /// Empty the cart and delete its snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted. The cart keeps its
    /// lines in that case.
    pub fn clear(&mut self) -> Result<(), SnapshotError> {
        let previous = std::mem::take(&mut self.cart);
        self.snapshots.remove(CART_SNAPSHOT_KEY).map_err(|e| {
            tracing::warn!(error = %e, "Cart snapshot removal failed, keeping cart");
            self.cart = previous;
            e
        })
    }

    /// Hand the current lines and totals to `presenter`.
    pub fn render<P: Presenter>(&self, presenter: &P) -> P::Output {
        presenter.render_cart(&self.entries(), &self.totals())
    }

    /// Persist the mutated cart, restoring `previous` if the write fails.
    fn commit(&mut self, previous: Cart) -> Result<(), SnapshotError> {
        self.persist().map_err(|e| {
            tracing::warn!(error = %e, "Cart snapshot write failed, rolling back");
            self.cart = previous;
            e
        })
    }

    fn persist(&self) -> Result<(), SnapshotError> {
        let snapshot = self.cart.to_snapshot()?;
        self.snapshots.save(CART_SNAPSHOT_KEY, &snapshot)
    }
}
