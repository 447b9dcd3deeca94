//! Catalog listing command.
//!
//! # Usage
//!
//! ```bash
//! # Every product, catalog order
//! vitrine catalog
//!
//! # T-shirts by popularity
//! vitrine catalog --search t-shirt --sort pop
//!
//! # Dresses between 60 and 100 euros
//! vitrine catalog --category Robes --price 60-100
//! ```

use clap::Args;
use vitrine_core::FilterCriteria;
use vitrine_storefront::catalog::Catalog;
use vitrine_storefront::presentation::Presenter;

/// Filter controls, mirroring the storefront filter bar.
#[derive(Debug, Default, Args)]
pub struct CatalogFilters {
    /// Case-insensitive substring of the product name
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category label (`T-shirts`, `Pantalons`, `Robes`, `Vestes`) or `all`
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Size (`XS`, `S`, `M`, `L`, `XL`) or `all`
    #[arg(long, default_value = "all")]
    pub size: String,

    /// Price band (`30`, `30-60`, `60-100`, `100`) or `all`
    #[arg(short, long, default_value = "all")]
    pub price: String,

    /// Sort mode (`asc`, `desc`, `pop`, `new`); catalog order when empty
    #[arg(long, default_value = "")]
    pub sort: String,
}

impl CatalogFilters {
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_controls(
            &self.search,
            &self.category,
            &self.size,
            &self.price,
            &self.sort,
        )
    }
}

/// Render the products matching `filters`.
pub fn list<P: Presenter>(catalog: &Catalog, filters: &CatalogFilters, presenter: &P) -> P::Output {
    let criteria = filters.criteria();
    tracing::debug!(?criteria, "Listing catalog");
    catalog.render(&criteria, presenter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::TextPresenter;

    fn filters(search: &str, category: &str, price: &str, sort: &str) -> CatalogFilters {
        CatalogFilters {
            search: search.to_string(),
            category: category.to_string(),
            size: "all".to_string(),
            price: price.to_string(),
            sort: sort.to_string(),
        }
    }

    #[test]
    fn test_tshirts_by_popularity() {
        let text = list(
            &Catalog::builtin(),
            &filters("t-shirt", "all", "all", "pop"),
            &TextPresenter,
        );
        let names: Vec<bool> = text
            .lines()
            .map(|line| line.contains("T-shirt graphique"))
            .collect();
        assert_eq!(names, vec![true, false]);
    }

    #[test]
    fn test_no_match_shows_placeholder() {
        let text = list(
            &Catalog::builtin(),
            &filters("", "Robes", "30", ""),
            &TextPresenter,
        );
        assert_eq!(text, "Aucun produit trouvé\n");
    }
}
