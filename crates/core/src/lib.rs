//! Vitrine Core - Shared types and pure storefront logic.
//!
//! This crate provides the pieces every Vitrine surface agrees on:
//! - `storefront` - HTTP storefront (catalog page, HTMX cart sidebar)
//! - `cli` - Terminal catalog browser and cart editor
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no filesystem access. Persistence and rendering live with the surfaces.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products
//! - [`cart`] - Cart entries, quantity rules, totals, snapshot encoding
//! - [`filter`] - Catalog filter/sort pipeline

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod types;

pub use cart::{Cart, CartEntry, CartTotals};
pub use filter::{FilterCriteria, PriceBand, Selector, SortMode};
pub use types::*;
