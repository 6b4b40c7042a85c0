//! Cart sink: where "add to cart" selections go.

use crate::{
    catalog::products::Product,
    customize::NeckStyle,
    foundation::error::{DrapeError, DrapeResult},
    layer::store::LayerSnapshot,
};

/// Everything the shopper chose, including the full layer snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSelection {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: f64,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck_style: Option<NeckStyle>,
    pub layers: Vec<LayerSnapshot>,
}

impl CartSelection {
    pub fn new(product: &Product, size: impl Into<String>, layers: Vec<LayerSnapshot>) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            size: size.into(),
            neck_style: None,
            layers,
        }
    }

    pub fn with_neck_style(self, neck_style: NeckStyle) -> Self {
        Self {
            neck_style: Some(neck_style),
            ..self
        }
    }
}

pub trait CartSink {
    fn add_to_cart(&mut self, selection: CartSelection) -> DrapeResult<()>;
}

/// Records selections in the log only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogCartSink;

impl CartSink for LogCartSink {
    fn add_to_cart(&mut self, selection: CartSelection) -> DrapeResult<()> {
        tracing::info!(
            product = %selection.product_id,
            size = %selection.size,
            neck_style = ?selection.neck_style,
            layers = selection.layers.len(),
            "added to cart"
        );
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    pub id: u64,
    pub selection: CartSelection,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.selection.unit_price * f64::from(self.quantity)
    }
}

/// Cart held for the session.
#[derive(Clone, Debug, Default)]
pub struct MemoryCart {
    items: Vec<CartItem>,
    next_id: u64,
}

impl MemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `selection`; returns the line id.
    pub fn add(&mut self, selection: CartSelection) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(CartItem {
            id,
            selection,
            quantity: 1,
        });
        id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn update_quantity(&mut self, id: u64, quantity: u32) -> DrapeResult<()> {
        if quantity < 1 {
            return Err(DrapeError::validation("quantity must be at least 1"));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| DrapeError::validation(format!("no cart line {id}")))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Shipping and tax are not modeled; the total is the subtotal.
    pub fn total(&self) -> f64 {
        self.subtotal()
    }
}

impl CartSink for MemoryCart {
    fn add_to_cart(&mut self, selection: CartSelection) -> DrapeResult<()> {
        let id = self.add(selection);
        tracing::info!(line = id, "added to cart");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/cart.rs"]
mod tests;
