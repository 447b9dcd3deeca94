//! Product records and their enum-like attributes.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;

/// Error returned when a control value names no known category or size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseAttributeError {
    kind: &'static str,
    value: String,
}

/// Product category.
///
/// Serialized with the storefront's display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "T-shirts")]
    TShirts,
    #[serde(rename = "Pantalons")]
    Trousers,
    #[serde(rename = "Robes")]
    Dresses,
    #[serde(rename = "Vestes")]
    Jackets,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Self; 4] = [Self::TShirts, Self::Trousers, Self::Dresses, Self::Jackets];

    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TShirts => "T-shirts",
            Self::Trousers => "Pantalons",
            Self::Dresses => "Robes",
            Self::Jackets => "Vestes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| ParseAttributeError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
}

impl Size {
    /// All sizes, smallest first.
    pub const ALL: [Self; 5] = [Self::XS, Self::S, Self::M, Self::L, Self::XL];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.label() == s)
            .ok_or_else(|| ParseAttributeError {
                kind: "size",
                value: s.to_string(),
            })
    }
}

/// Highest accepted unit price, in euros.
pub const MAX_UNIT_PRICE: i64 = 1_000_000;

/// A purchasable product.
///
/// Products are seeded once and never mutated. The serialized shape is also
/// the product half of a persisted cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub size: Size,
    /// Unit price in euros.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Ranking weight for the popularity sort.
    pub popularity: u32,
    /// Image path relative to the static root.
    pub image: String,
}

impl Product {
    /// Unit price with currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::eur(self.price)
    }

    /// Whether the unit price lies within `0..=MAX_UNIT_PRICE` euros.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        self.price >= Decimal::ZERO && self.price <= Decimal::new(MAX_UNIT_PRICE, 0)
    }
}

/// The built-in catalog.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    fn product(
        id: i32,
        name: &str,
        category: Category,
        size: Size,
        price: i64,
        popularity: u32,
        image: &str,
    ) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category,
            size,
            price: Decimal::new(price, 0),
            popularity,
            image: image.to_string(),
        }
    }

    vec![
        product(1, "T-shirt oversize", Category::TShirts, Size::M, 25, 120, "assets/tshirt-oversize.svg"),
        product(2, "Pantalon slim", Category::Trousers, Size::L, 45, 90, "assets/pantalon-slim.svg"),
        product(3, "Robe élégante", Category::Dresses, Size::S, 75, 180, "assets/robe-elegante.svg"),
        product(4, "Veste en jean", Category::Jackets, Size::M, 60, 150, "assets/veste-jean.svg"),
        product(5, "T-shirt graphique", Category::TShirts, Size::L, 30, 200, "assets/tshirt-graphique.svg"),
    ]
}
