//! Column projection for invoice listings
//!
//! Purely presentational: the visible column set never influences which
//! invoices match or how they are ordered.

use crate::core::FieldValue;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Output field of a listing row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    InvoiceNumber,
    Client,
    Status,
    Date,
    DueDate,
    Items,
    Subtotal,
    Tax,
    Total,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::InvoiceNumber,
        Column::Client,
        Column::Status,
        Column::Date,
        Column::DueDate,
        Column::Items,
        Column::Subtotal,
        Column::Tax,
        Column::Total,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::InvoiceNumber => "invoiceNumber",
            Column::Client => "client",
            Column::Status => "status",
            Column::Date => "date",
            Column::DueDate => "dueDate",
            Column::Items => "items",
            Column::Subtotal => "subtotal",
            Column::Tax => "tax",
            Column::Total => "total",
        }
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| format!("unknown column '{}'", s))
    }
}

/// Ordered set of visible columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet(IndexSet<Column>);

impl Default for ColumnSet {
    fn default() -> Self {
        Self::from_columns([
            Column::InvoiceNumber,
            Column::Client,
            Column::Status,
            Column::Date,
            Column::DueDate,
            Column::Total,
        ])
    }
}

impl ColumnSet {
    /// Every column, in canonical order
    pub fn all() -> Self {
        Self::from_columns(Column::ALL)
    }

    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        Self(columns.into_iter().collect())
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.0.contains(&column)
    }

    /// Append a column at the end if it is not already visible
    pub fn show(&mut self, column: Column) {
        self.0.insert(column);
    }

    pub fn hide(&mut self, column: Column) {
        self.0.shift_remove(&column);
    }

    /// Flip visibility; returns the new state
    pub fn toggle(&mut self, column: Column) -> bool {
        if self.is_visible(column) {
            self.hide(column);
            false
        } else {
            self.show(column);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One projected listing row, fields in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub id: String,
    pub fields: IndexMap<Column, FieldValue>,
}

impl InvoiceRow {
    pub fn get(&self, column: Column) -> Option<&FieldValue> {
        self.fields.get(&column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        let columns = ColumnSet::default();
        assert!(columns.is_visible(Column::Total));
        assert!(!columns.is_visible(Column::Tax));
        assert_eq!(columns.len(), 6);
    }

    #[test]
    fn test_toggle_and_order() {
        let mut columns = ColumnSet::from_columns([Column::Total, Column::InvoiceNumber]);
        assert!(columns.toggle(Column::Status));
        assert!(!columns.toggle(Column::Total));

        let order: Vec<Column> = columns.iter().collect();
        assert_eq!(order, vec![Column::InvoiceNumber, Column::Status]);
    }

    #[test]
    fn test_column_names() {
        assert_eq!("dueDate".parse::<Column>().unwrap(), Column::DueDate);
        assert!("amount".parse::<Column>().is_err());
        assert_eq!(ColumnSet::all().len(), Column::ALL.len());
    }

    #[test]
    fn test_serde_as_list() {
        let columns: ColumnSet = serde_json::from_str(r#"["total", "client"]"#).unwrap();
        assert_eq!(columns.iter().collect::<Vec<_>>(), vec![Column::Total, Column::Client]);
    }
}
