//! Facet filters for invoice listings
//!
//! Every facet defaults to "no restriction". An empty status or client set
//! lets everything through; it never means "match nothing".

use crate::entities::{Invoice, InvoiceStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive bounds on the invoice date; each bound is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Inclusive bounds on the invoice total; each bound is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountRange {
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Search text plus the four facets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceFilters {
    /// Case-insensitive substring of the invoice number or client name
    pub search: String,
    pub statuses: BTreeSet<InvoiceStatus>,
    pub clients: BTreeSet<String>,
    pub date_range: DateRange,
    pub amount_range: AmountRange,
}

impl InvoiceFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.clients.insert(client_id.into());
        self
    }

    pub fn with_date_range(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.date_range = DateRange { from, to };
        self
    }

    pub fn with_amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.amount_range = AmountRange { min, max };
        self
    }

    /// Add the status if absent, remove it if present
    pub fn toggle_status(&mut self, status: InvoiceStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    /// Add the client if absent, remove it if present
    pub fn toggle_client(&mut self, client_id: &str) {
        if !self.clients.remove(client_id) {
            self.clients.insert(client_id.to_string());
        }
    }

    /// Reset the four facets, keeping the search text
    pub fn clear_facets(&mut self) {
        self.statuses.clear();
        self.clients.clear();
        self.date_range = DateRange::default();
        self.amount_range = AmountRange::default();
    }

    /// How many of status / client / date range / amount range are not at
    /// their default. The search text is not counted.
    pub fn active_count(&self) -> usize {
        [
            !self.statuses.is_empty(),
            !self.clients.is_empty(),
            self.date_range.is_active(),
            self.amount_range.is_active(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Facet predicates only; search needs client names and is applied by
    /// the engine
    pub fn matches_facets(&self, invoice: &Invoice) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&invoice.status))
            && (self.clients.is_empty() || self.clients.contains(&invoice.client_id))
            && self.date_range.contains(invoice.date)
            && self.amount_range.contains(invoice.total)
    }

    /// Lowercased search needle, `None` when the search is empty
    pub(crate) fn search_needle(&self) -> Option<String> {
        if self.search.is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        }
    }
}
