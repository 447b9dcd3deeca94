//! Shopping cart model.
//!
//! A [`Cart`] holds at most one [`CartEntry`] per product, in insertion order.
//! Entries are keyed by [`ProductId`] internally; positional indices only
//! appear at the rendering boundary, where buttons refer to "the n-th line".
//!
//! Every entry has a quantity of at least 1. Operations that would take a
//! quantity to zero or below remove the entry instead.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A product in the cart with the quantity the shopper intends to buy.
///
/// The product fields are copied at the time of the first add and persisted
/// alongside the quantity, so the snapshot shape is the product's fields plus
/// `qty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartEntry {
    /// Create an entry with quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }

    #[must_use]
    pub fn line_price(&self) -> Price {
        Price::eur(self.line_total())
    }
}

/// Derived cart aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of all entry quantities.
    pub quantity: u64,
    /// Sum of price times quantity over all entries.
    pub price: Decimal,
}

impl CartTotals {
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::eur(self.price)
    }
}

/// Outcome of a quantity change on an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line is still in the cart with this quantity.
    Updated(u32),
    /// The quantity reached zero or below and the line was removed.
    Removed,
}

/// An ordered, id-keyed collection of cart entries.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: IndexMap<ProductId, CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &CartEntry> + DoubleEndedIterator {
        self.entries.values()
    }

    /// Look up the entry for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.get(&id)
    }

    /// Display position of a product's entry.
    #[must_use]
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.entries.get_index_of(&id)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing entry, or appends a new entry with quantity 1.
    /// Returns the entry's quantity after the add.
    pub fn add(&mut self, product: &Product) -> u32 {
        let entry = self
            .entries
            .entry(product.id)
            .and_modify(|entry| entry.quantity = entry.quantity.saturating_add(1))
            .or_insert_with(|| CartEntry::new(product.clone()));
        entry.quantity
    }

    /// Remove the entry at `index`, keeping the order of the others.
    ///
    /// Returns `None` when the index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<CartEntry> {
        self.entries
            .shift_remove_index(index)
            .map(|(_, entry)| entry)
    }

    /// Add `delta` to the quantity of the entry at `index`.
    ///
    /// Returns `None` when the index is out of range.
    pub fn change_quantity_at(&mut self, index: usize, delta: i32) -> Option<QuantityChange> {
        let (_, entry) = self.entries.get_index_mut(index)?;
        let quantity = i64::from(entry.quantity) + i64::from(delta);

        if quantity <= 0 {
            self.entries.shift_remove_index(index);
            return Some(QuantityChange::Removed);
        }

        entry.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Some(QuantityChange::Updated(entry.quantity))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Compute item count and total price.
    ///
    /// Both sums saturate instead of overflowing.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.entries
            .values()
            .fold(CartTotals::default(), |totals, entry| CartTotals {
                quantity: totals.quantity.saturating_add(u64::from(entry.quantity)),
                price: totals.price.saturating_add(entry.line_total()),
            })
    }

    /// Serialize the full cart as a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_snapshot(&self) -> serde_json::Result<String> {
        let entries: Vec<&CartEntry> = self.entries.values().collect();
        serde_json::to_string(&entries)
    }

    /// Rebuild a cart from a snapshot produced by [`Cart::to_snapshot`].
    ///
    /// Entries with a zero quantity or a unit price outside
    /// `0..=MAX_UNIT_PRICE` are dropped and repeated ids are merged into the
    /// first occurrence, so the result always upholds the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is not a JSON array of entries.
    pub fn from_snapshot(snapshot: &str) -> serde_json::Result<Self> {
        let entries: Vec<CartEntry> = serde_json::from_str(snapshot)?;
        Ok(entries.into_iter().collect())
    }
}

impl FromIterator<CartEntry> for Cart {
    fn from_iter<I: IntoIterator<Item = CartEntry>>(iter: I) -> Self {
        let mut entries: IndexMap<ProductId, CartEntry> = IndexMap::new();
        let valid = |entry: &CartEntry| entry.quantity > 0 && entry.product.has_valid_price();
        for entry in iter.into_iter().filter(valid) {
            entries
                .entry(entry.id())
                .and_modify(|existing| {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity);
                })
                .or_insert(entry);
        }
        Self { entries }
    }
}
