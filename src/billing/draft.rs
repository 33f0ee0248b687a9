//! Editable line list for an invoice under construction
//!
//! Totals are recomputed after every mutation so a caller can always render
//! them without asking.

use super::{Billing, LineItemDraft, Totals, compute, compute_totals};
use crate::core::ProductLookup;
use uuid::Uuid;

/// One editable line, addressed by a draft-local id
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub line_id: String,
    pub item: LineItemDraft,
}

/// Line items being assembled for a new invoice
pub struct InvoiceDraft<'a, P: ProductLookup + ?Sized> {
    products: &'a P,
    lines: Vec<DraftLine>,
    totals: Totals,
}

impl<'a, P: ProductLookup + ?Sized> InvoiceDraft<'a, P> {
    pub fn new(products: &'a P) -> Self {
        Self {
            products,
            lines: Vec::new(),
            totals: Totals::default(),
        }
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Append one unit of a product at its catalogue price
    ///
    /// Returns the new line id, or `None` if the product is unknown.
    pub fn add_product(&mut self, product_id: &str) -> Option<String> {
        let product = self.products.product(product_id)?;
        let line_id = Uuid::new_v4().to_string();

        self.lines.push(DraftLine {
            line_id: line_id.clone(),
            item: LineItemDraft::from_product(&product),
        });
        self.recompute();
        Some(line_id)
    }

    /// Remove a line; false when the id is unknown
    pub fn remove(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.line_id != line_id);
        let removed = self.lines.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Change a line's quantity (clamped to at least 1); false when the id
    /// is unknown
    pub fn set_quantity(&mut self, line_id: &str, quantity: f64) -> bool {
        let Some(line) = self.lines.iter_mut().find(|line| line.line_id == line_id) else {
            return false;
        };
        line.item.set_quantity(quantity);
        self.recompute();
        true
    }

    /// The lines and amounts to persist
    pub fn billing(&self) -> Billing {
        compute(&self.items(), self.products)
    }

    fn items(&self) -> Vec<LineItemDraft> {
        self.lines.iter().map(|line| line.item.clone()).collect()
    }

    fn recompute(&mut self) {
        self.totals = compute_totals(&self.items(), self.products);
    }
}
