//! Invoice financial computation
//!
//! - `unit total = quantity × unit price`
//! - `subtotal = Σ unit totals`
//! - `tax = Σ unit total × product tax % / 100`, each line at its own
//!   product's rate
//! - `total = subtotal + tax`
//!
//! Plain `f64` arithmetic, no rounding. A [`Billing`] value can only be
//! produced by [`compute`] (or an [`InvoiceDraft`]), which is what keeps the
//! persisted `subtotal`/`tax`/`total` triple consistent.

pub mod draft;

pub use draft::{DraftLine, InvoiceDraft};

use crate::core::ProductLookup;
use crate::entities::{LineItem, Product};
use serde::Serialize;

/// Smallest quantity a line can hold
pub const MIN_QUANTITY: f64 = 1.0;

/// Clamp an edited quantity to at least [`MIN_QUANTITY`]
///
/// NaN also clamps to the minimum.
pub fn clamp_quantity(quantity: f64) -> f64 {
    quantity.max(MIN_QUANTITY)
}

/// `quantity × unit_price`
pub fn unit_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// A line being billed, still linked to the product it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemDraft {
    pub product_id: String,
    pub description: String,
    quantity: f64,
    pub unit_price: f64,
}

impl LineItemDraft {
    /// Build a line; the quantity is clamped like any other edit
    pub fn new(
        product_id: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            description: description.into(),
            quantity: clamp_quantity(quantity),
            unit_price,
        }
    }

    /// One unit of `product` at its catalogue price
    pub fn from_product(product: &Product) -> Self {
        Self::new(
            product.id.clone(),
            product.description.clone(),
            MIN_QUANTITY,
            product.price,
        )
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Set the quantity, clamping values below 1 to 1
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = clamp_quantity(quantity);
    }

    pub fn total_price(&self) -> f64 {
        unit_total(self.quantity, self.unit_price)
    }

    /// The persisted form of this line (the product link is dropped)
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            description: self.description.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price(),
        }
    }
}

/// Invoice amounts derived from its lines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Computed lines and amounts, always written to an invoice together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Billing {
    items: Vec<LineItem>,
    subtotal: f64,
    tax: f64,
    total: f64,
}

impl Billing {
    /// No lines, all amounts zero
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
        }
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

/// Totals for a set of lines, taxing each at its product's rate
///
/// Lines whose product cannot be resolved are taxed at 0%.
pub fn compute_totals<P: ProductLookup + ?Sized>(items: &[LineItemDraft], products: &P) -> Totals {
    let mut subtotal = 0.0;
    let mut tax = 0.0;

    for item in items {
        let line_total = item.total_price();
        subtotal += line_total;
        tax += line_total * products.tax_percent(&item.product_id) / 100.0;
    }

    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Compute the persisted lines and amounts for an invoice
pub fn compute<P: ProductLookup + ?Sized>(items: &[LineItemDraft], products: &P) -> Billing {
    let totals = compute_totals(items, products);
    Billing {
        items: items.iter().map(LineItemDraft::to_line_item).collect(),
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
    }
}
