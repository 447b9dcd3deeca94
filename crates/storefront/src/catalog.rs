//! Product catalog.
//!
//! The catalog is loaded once at startup, either from the built-in product
//! list or from a JSON file, and never mutated afterwards. Loading rejects
//! catalogs that reuse a product id or price a product outside
//! `0..=MAX_UNIT_PRICE` euros.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use vitrine_core::filter::{self, FilterCriteria};
use vitrine_core::{MAX_UNIT_PRICE, Product, ProductId, default_catalog};

use crate::presentation::Presenter;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {id} has price {price}, expected 0 to {max}", max = MAX_UNIT_PRICE)]
    InvalidPrice { id: ProductId, price: Decimal },
}

/// The static set of purchasable products.
///
/// Cheaply cloneable via `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id, or
    /// `CatalogError::InvalidPrice` if a price is negative or above
    /// `MAX_UNIT_PRICE`.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if let Some(product) = products.iter().find(|p| !p.has_valid_price()) {
            return Err(CatalogError::InvalidPrice {
                id: product.id,
                price: product.price,
            });
        }

        let mut seen = HashSet::with_capacity(products.len());
        if let Some(duplicate) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateId(duplicate.id));
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: default_catalog().into(),
        }
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if it reuses
    /// a product id, or if a price is out of range.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&json)?;
        tracing::info!(path = %path.display(), count = products.len(), "Loaded catalog");
        Self::new(products)
    }

    /// Load from `path` when given, otherwise use the built-in catalog.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        path.map_or_else(|| Ok(Self::builtin()), Self::from_file)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products matching `criteria`, in the requested order.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        filter::apply(&self.products, criteria)
    }

    /// Filter, then hand the result to `presenter`.
    pub fn render<P: Presenter>(&self, criteria: &FilterCriteria, presenter: &P) -> P::Output {
        presenter.render_catalog(&self.filter(criteria))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_catalog_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog.find(ProductId::new(3)).map(|p| p.name.as_str()),
            Some("Robe élégante")
        );
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut products = default_catalog();
        let mut copy = products[0].clone();
        copy.name = "Copie".to_string();
        products.push(copy);

        let err = Catalog::new(products).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_out_of_range_prices_are_rejected() {
        let mut products = default_catalog();
        products[2].price = Decimal::new(-5, 0);
        let err = Catalog::new(products).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidPrice { id, price }
                if id == ProductId::new(3) && price == Decimal::new(-5, 0)
        ));

        let mut products = default_catalog();
        products[0].price = Decimal::new(MAX_UNIT_PRICE, 0) + Decimal::ONE;
        assert!(matches!(
            Catalog::new(products).unwrap_err(),
            CatalogError::InvalidPrice { id, .. } if id == ProductId::new(1)
        ));
    }

    #[test]
    fn test_from_file_rejects_negative_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":11,"name":"Bob","category":"Vestes","size":"M","price":-5,"popularity":1,"image":"assets/veste-jean.svg"}}]"#
        )
        .unwrap();

        let err = Catalog::from_file(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "product 11 has price -5, expected 0 to 1000000"
        );
    }

    #[test]
    fn test_builtin_prices_are_in_range() {
        assert!(Catalog::new(default_catalog()).is_ok());
    }

    #[test]
    fn test_builtin_images_ship_with_static_assets() {
        let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
        for product in Catalog::builtin().products() {
            let image = static_dir.join(&product.image);
            assert!(image.is_file(), "missing {}", image.display());
        }
    }

    #[test]
    fn test_load_without_path_uses_builtin() {
        let catalog = Catalog::load(None).unwrap();
        assert_eq!(catalog.products(), Catalog::builtin().products());
    }

    #[test]
    fn test_from_file_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":10,"name":"Jupe plissée","category":"Robes","size":"S","price":39.9,"popularity":12,"image":"assets/jupe.jpg"}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name, "Jupe plissée");
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Catalog::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_filter_delegates_to_pipeline() {
        let catalog = Catalog::builtin();
        let criteria = FilterCriteria::from_controls("t-shirt", "all", "all", "all", "pop");
        let ids: Vec<i32> = catalog
            .filter(&criteria)
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![5, 1]);
    }
}
