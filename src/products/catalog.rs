use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StartupError;

pub const DEFAULT_CATALOG_PATH: &str = "products.json";
pub const MAX_RATING: f64 = 5.0;

/// One catalog record. Fields beyond the known ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub in_stock: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        rating: f64,
        in_stock: bool,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            rating,
            in_stock,
            extra: Map::new(),
        }
    }

    fn check(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "product '{}' has invalid price {}",
                self.name, self.price
            ));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(format!(
                "product '{}' has rating {} outside 0.0 - 5.0",
                self.name, self.rating
            ));
        }
        Ok(())
    }
}

/// Immutable product list loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Reads a JSON array of products. Any failure is a fatal startup error.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StartupError::CatalogNotFound {
                path: path.to_path_buf(),
            },
            _ => StartupError::CatalogUnreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| StartupError::CatalogMalformed {
                path: path.to_path_buf(),
                source,
            })?;

        for product in &products {
            product
                .check()
                .map_err(|reason| StartupError::CatalogRecord {
                    path: path.to_path_buf(),
                    reason,
                })?;
        }

        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|product| product.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Lowest and highest price, or `None` for an empty catalog.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.products.iter().fold(None, |range, product| match range {
            None => Some((product.price, product.price)),
            Some((low, high)) => Some((low.min(product.price), high.max(product.price))),
        })
    }
}
