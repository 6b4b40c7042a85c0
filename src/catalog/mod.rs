//! Static product catalog and its lookups.

pub(crate) mod products;

use std::path::Path;

use anyhow::Context;

use crate::{
    catalog::products::{Category, Product},
    foundation::error::{DrapeError, DrapeResult},
};

const BUILTIN_PRODUCTS: &str = include_str!("products.json");

/// In-memory product list, kept in the order it was loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> DrapeResult<Self> {
        for (i, p) in products.iter().enumerate() {
            p.validate()?;
            if products[..i].iter().any(|q| q.id == p.id) {
                return Err(DrapeError::validation(format!(
                    "duplicate product id '{}'",
                    p.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// The storefront's bundled products.
    pub fn builtin() -> DrapeResult<Self> {
        Self::from_json(BUILTIN_PRODUCTS)
    }

    pub fn from_json(s: &str) -> DrapeResult<Self> {
        let products: Vec<Product> = serde_json::from_str(s)?;
        Self::new(products)
    }

    pub fn load(path: &Path) -> DrapeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn customizable(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_customizable).collect()
    }

    pub fn virtual_try_on(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_virtual_try_on).collect()
    }

    /// First `limit` products in catalog order.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().take(limit).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/catalog.rs"]
mod tests;
