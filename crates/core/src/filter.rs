//! Catalog filter/sort pipeline.
//!
//! [`apply`] keeps the products matching every criterion (name search,
//! category, size, price band) and then orders them by the selected
//! [`SortMode`]. Sorting is stable: products with equal keys keep their
//! catalog order.
//!
//! Criteria are built from the raw values of the storefront's filter
//! controls. `"all"` (or an empty value) is the wildcard for every selector.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::{Category, Product, Size};

/// Control value that selects every option.
pub const WILDCARD: &str = "all";

/// A selector over an enum-like attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    /// Matches every product.
    Any,
    /// Matches products whose attribute satisfies this value.
    Exact(T),
    /// A control value naming nothing in the catalog; matches no product.
    Unmatched,
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: FromStr> Selector<T> {
    /// Parse a raw control value.
    #[must_use]
    pub fn from_control(value: &str) -> Self {
        if value.is_empty() || value == WILDCARD {
            return Self::Any;
        }
        value.parse().map_or(Self::Unmatched, Self::Exact)
    }
}

impl<T> Selector<T> {
    /// Evaluate the selector with a custom predicate for the exact case.
    pub fn test(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(value) => predicate(value),
            Self::Unmatched => false,
        }
    }
}

impl<T: PartialEq> Selector<T> {
    /// Whether `value` is selected.
    pub fn matches(&self, value: &T) -> bool {
        self.test(|selected| selected == value)
    }
}

/// One of four disjoint price ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBand {
    /// Strictly below 30.
    Under30,
    /// 30 to 60, both inclusive.
    From30To60,
    /// Above 60, up to and including 100.
    From60To100,
    /// Strictly above 100.
    Over100,
}

impl PriceBand {
    pub const ALL: [Self; 4] = [
        Self::Under30,
        Self::From30To60,
        Self::From60To100,
        Self::Over100,
    ];

    /// Control value for this band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under30 => "30",
            Self::From30To60 => "30-60",
            Self::From60To100 => "60-100",
            Self::Over100 => "100",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under30 => "Moins de 30 €",
            Self::From30To60 => "30 € - 60 €",
            Self::From60To100 => "60 € - 100 €",
            Self::Over100 => "Plus de 100 €",
        }
    }

    /// Whether `price` falls inside this band.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let thirty = Decimal::from(30);
        let sixty = Decimal::from(60);
        let hundred = Decimal::from(100);

        match self {
            Self::Under30 => price < thirty,
            Self::From30To60 => price >= thirty && price <= sixty,
            Self::From60To100 => price > sixty && price <= hundred,
            Self::Over100 => price > hundred,
        }
    }
}

impl FromStr for PriceBand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|band| band.as_str() == s)
            .ok_or(())
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    None,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most popular first.
    Popularity,
    /// Newest first (highest id).
    Newest,
}

impl SortMode {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Popularity,
        Self::Newest,
    ];

    /// Parse a sort control value. Unknown values leave catalog order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "asc" => Self::PriceAsc,
            "desc" => Self::PriceDesc,
            "pop" => Self::Popularity,
            "new" => Self::Newest,
            _ => Self::None,
        }
    }

    /// Control value for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::PriceAsc => "asc",
            Self::PriceDesc => "desc",
            Self::Popularity => "pop",
            Self::Newest => "new",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Trier par",
            Self::PriceAsc => "Prix croissant",
            Self::PriceDesc => "Prix décroissant",
            Self::Popularity => "Popularité",
            Self::Newest => "Nouveautés",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::None => Ordering::Equal,
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Popularity => b.popularity.cmp(&a.popularity),
            Self::Newest => b.id.cmp(&a.id),
        }
    }
}

/// Filter and sort criteria, rebuilt from the controls on every input event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the product name.
    pub search: String,
    pub category: Selector<Category>,
    pub size: Selector<Size>,
    pub price: Selector<PriceBand>,
    pub sort: SortMode,
}

impl FilterCriteria {
    /// Build criteria from raw control values.
    #[must_use]
    pub fn from_controls(search: &str, category: &str, size: &str, price: &str, sort: &str) -> Self {
        Self {
            search: search.to_string(),
            category: Selector::from_control(category),
            size: Selector::from_control(size),
            price: Selector::from_control(price),
            sort: SortMode::parse(sort),
        }
    }

    /// Whether `product` satisfies every predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(&product.category)
            && self.size.matches(&product.size)
            && self.price.test(|band| band.contains(product.price))
            && product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

/// Select and order the products matching `criteria`.
///
/// Returns an empty vector when nothing matches.
#[must_use]
pub fn apply<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = products.iter().filter(|p| criteria.matches(p)).collect();

    if criteria.sort != SortMode::None {
        result.sort_by(|a, b| criteria.sort.compare(a, b));
    }

    result
}
