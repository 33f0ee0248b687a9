//! Invoice listing pipeline: search, facets, sort and column projection
//!
//! The pipeline works over an in-memory slice of invoices. Client names are
//! resolved through a [`ClientLookup`] once per call and cached for the
//! duration of that call.
//!
//! ```rust,ignore
//! let clients = context.clients().get_all()?;
//! let query = InvoiceQuery::new(&clients);
//!
//! let filters = InvoiceFilters::new()
//!     .with_search("acme")
//!     .with_status(InvoiceStatus::Sent);
//! let listed = query.apply(&invoices, &filters, Some(&SortSpec::parse("total:desc")?));
//! let rows = query.project(&listed, &ColumnSet::default());
//! ```

pub mod columns;
pub mod filters;
pub mod sort;
pub mod stats;

pub use columns::{Column, ColumnSet, InvoiceRow};
pub use filters::{AmountRange, DateRange, InvoiceFilters};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use stats::ClientStats;

use crate::core::{ClientLookup, FieldValue};
use crate::entities::Invoice;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Number of non-default facets among status, client, date range and amount
/// range
pub fn active_filter_count(filters: &InvoiceFilters) -> usize {
    filters.active_count()
}

/// Client id → resolved name, `None` for dangling references
type ClientNames = HashMap<String, Option<String>>;

/// The listing pipeline, bound to a client lookup
pub struct InvoiceQuery<'a, C: ClientLookup + ?Sized> {
    clients: &'a C,
}

impl<'a, C: ClientLookup + ?Sized> InvoiceQuery<'a, C> {
    pub fn new(clients: &'a C) -> Self {
        Self { clients }
    }

    /// Filter, then sort when a sort is given
    pub fn apply(
        &self,
        invoices: &[Invoice],
        filters: &InvoiceFilters,
        sort: Option<&SortSpec>,
    ) -> Vec<Invoice> {
        let names = self.resolve_names(invoices);
        let mut selected: Vec<Invoice> = invoices
            .iter()
            .filter(|invoice| Self::passes(invoice, filters, &names))
            .cloned()
            .collect();

        if let Some(sort) = sort {
            Self::sort_with(&mut selected, sort, &names);
        }

        tracing::debug!(
            input = invoices.len(),
            matched = selected.len(),
            active_facets = filters.active_count(),
            "invoice query applied"
        );
        selected
    }

    /// Search and facets only, input order preserved
    pub fn filter(&self, invoices: &[Invoice], filters: &InvoiceFilters) -> Vec<Invoice> {
        self.apply(invoices, filters, None)
    }

    /// Whether a single invoice passes search and every active facet
    pub fn matches(&self, invoice: &Invoice, filters: &InvoiceFilters) -> bool {
        let names = self.resolve_names(std::slice::from_ref(invoice));
        Self::passes(invoice, filters, &names)
    }

    /// Stable in-place sort
    pub fn sort(&self, invoices: &mut [Invoice], sort: &SortSpec) {
        let names = self.resolve_names(invoices);
        Self::sort_with(invoices, sort, &names);
    }

    /// Project invoices onto the visible columns, preserving order
    pub fn project(&self, invoices: &[Invoice], columns: &ColumnSet) -> Vec<InvoiceRow> {
        let names = if columns.is_visible(Column::Client) {
            self.resolve_names(invoices)
        } else {
            ClientNames::new()
        };

        invoices
            .iter()
            .map(|invoice| InvoiceRow {
                id: invoice.id.clone(),
                fields: columns
                    .iter()
                    .map(|column| (column, Self::field(invoice, column, &names)))
                    .collect(),
            })
            .collect()
    }

    fn resolve_names(&self, invoices: &[Invoice]) -> ClientNames {
        let mut names = ClientNames::new();
        for invoice in invoices {
            names.entry(invoice.client_id.clone()).or_insert_with(|| {
                let name = self.clients.client_name(&invoice.client_id);
                if name.is_none() {
                    tracing::warn!(
                        invoice_id = %invoice.id,
                        client_id = %invoice.client_id,
                        "invoice references a missing client"
                    );
                }
                name
            });
        }
        names
    }

    fn client_name<'n>(invoice: &Invoice, names: &'n ClientNames) -> Option<&'n str> {
        names
            .get(invoice.client_id.as_str())
            .and_then(|name| name.as_deref())
    }

    fn passes(invoice: &Invoice, filters: &InvoiceFilters, names: &ClientNames) -> bool {
        if let Some(needle) = filters.search_needle() {
            let in_number = invoice.invoice_number.to_lowercase().contains(&needle);
            let in_client = Self::client_name(invoice, names)
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            if !in_number && !in_client {
                return false;
            }
        }

        filters.matches_facets(invoice)
    }

    fn sort_with(invoices: &mut [Invoice], sort: &SortSpec, names: &ClientNames) {
        let compare = |a: &Invoice, b: &Invoice| -> Ordering {
            match sort.key {
                SortKey::InvoiceNumber => a.invoice_number.cmp(&b.invoice_number),
                SortKey::ClientName => Self::client_name(a, names)
                    .unwrap_or_default()
                    .cmp(Self::client_name(b, names).unwrap_or_default()),
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::DueDate => a.due_date.cmp(&b.due_date),
                SortKey::Total => a.total.total_cmp(&b.total),
                SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            }
        };

        match sort.direction {
            SortDirection::Asc => invoices.sort_by(compare),
            SortDirection::Desc => invoices.sort_by(|a, b| compare(a, b).reverse()),
        }
    }

    fn field(invoice: &Invoice, column: Column, names: &ClientNames) -> FieldValue {
        match column {
            Column::InvoiceNumber => invoice.invoice_number.as_str().into(),
            Column::Client => Self::client_name(invoice, names).into(),
            Column::Status => invoice.status.as_str().into(),
            Column::Date => invoice.date.into(),
            Column::DueDate => invoice.due_date.into(),
            Column::Items => FieldValue::Integer(invoice.items.len() as i64),
            Column::Subtotal => invoice.subtotal.into(),
            Column::Tax => invoice.tax.into(),
            Column::Total => invoice.total.into(),
        }
    }
}
