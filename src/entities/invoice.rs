//! Invoice records

use crate::billing::Billing;
use crate::config::InvoiceSettings;
use crate::core::error::{ConfigError, Result};
use crate::core::{Clock, Entity, SystemClock};
use crate::entities::repository::Repository;
use crate::query::ClientStats;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    /// Sent or overdue: issued but not settled
    pub fn is_outstanding(&self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown invoice status '{}'", s))
    }
}

/// A persisted invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// An invoice issued to a client
///
/// `client_id` is a weak reference: the client may have been deleted since,
/// so resolve it through the client repository and handle `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub client_id: String,
    pub invoice_number: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

impl Entity for Invoice {
    type Patch = InvoicePatch;

    fn collection() -> &'static str {
        "Invoice"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Data required to create an invoice
///
/// Amounts come exclusively from a computed [`Billing`].
#[derive(Debug, Clone)]
pub struct InvoiceInput {
    pub client_id: String,
    pub invoice_number: String,
    pub status: Option<InvoiceStatus>,
    pub date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub billing: Billing,
    pub terms: Option<String>,
}

impl InvoiceInput {
    pub fn new(client_id: impl Into<String>, invoice_number: impl Into<String>, billing: Billing) -> Self {
        Self {
            client_id: client_id.into(),
            invoice_number: invoice_number.into(),
            status: None,
            date: None,
            due_date: None,
            billing,
            terms: None,
        }
    }
}

impl Invoice {
    /// Build an invoice, filling status/date/due date defaults
    ///
    /// The due date defaults to `date + due_in_days`. A term that falls
    /// outside the representable date range is a config error.
    pub fn from_input(
        id: String,
        input: InvoiceInput,
        now: DateTime<Utc>,
        due_in_days: i64,
    ) -> Result<Self> {
        let date = input.date.unwrap_or(now);
        let due_date = match input.due_date {
            Some(due_date) => due_date,
            None => Duration::try_days(due_in_days)
                .and_then(|term| date.checked_add_signed(term))
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "invoices.due_in_days".to_string(),
                    message: format!("{} days from {} is out of range", due_in_days, date),
                })?,
        };
        let totals = input.billing.totals();

        Ok(Self {
            id,
            client_id: input.client_id,
            invoice_number: input.invoice_number,
            status: input.status.unwrap_or_default(),
            date,
            due_date,
            items: input.billing.into_items(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            terms: input.terms,
        })
    }

    /// True when `total == subtotal + tax` holds exactly
    pub fn amounts_consistent(&self) -> bool {
        self.total == self.subtotal + self.tax
    }
}

/// Partial update for an invoice
///
/// `subtotal`, `tax` and `total` cannot be set individually. They change only
/// through a recomputed [`Billing`], which rewrites items and all three
/// amounts together.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<Option<String>>,
    #[serde(flatten)]
    pub billing: Option<Billing>,
}

pub type InvoiceRepository = Repository<Invoice>;

impl Repository<Invoice> {
    /// Create and persist an invoice with default settings and the system
    /// clock
    pub fn create(&self, input: InvoiceInput) -> Result<Invoice> {
        self.create_with(input, &InvoiceSettings::default(), &SystemClock)
    }

    /// Create and persist an invoice under a fresh id
    pub fn create_with(
        &self,
        input: InvoiceInput,
        settings: &InvoiceSettings,
        clock: &dyn Clock,
    ) -> Result<Invoice> {
        let invoice = Invoice::from_input(self.generate_id(), input, clock.now(), settings.due_in_days)?;
        tracing::debug!(
            id = %invoice.id,
            number = %invoice.invoice_number,
            client_id = %invoice.client_id,
            "creating invoice"
        );
        self.save(&invoice)
    }

    /// Invoices referencing `client_id` (full collection scan)
    pub fn get_by_client_id(&self, client_id: &str) -> Result<Vec<Invoice>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|invoice| invoice.client_id == client_id)
            .collect())
    }

    /// Change only the status; `None` when the invoice does not exist
    pub fn update_status_by_id(&self, id: &str, status: InvoiceStatus) -> Result<Option<Invoice>> {
        let patch = InvoicePatch {
            status: Some(status),
            ..Default::default()
        };
        let updated = self.update_by_id(id, &patch)?;
        if updated.is_some() {
            tracing::info!(id, status = %status, "invoice status changed");
        }
        Ok(updated)
    }

    /// Replace the lines and all three amounts at once
    pub fn update_billing_by_id(&self, id: &str, billing: Billing) -> Result<Option<Invoice>> {
        let patch = InvoicePatch {
            billing: Some(billing),
            ..Default::default()
        };
        self.update_by_id(id, &patch)
    }

    /// Next business number for `day`: `<prefix>-YYYYMMDD-NNN`
    ///
    /// NNN is one more than the number of invoices dated that (UTC) day,
    /// zero-padded to three digits. Uniqueness is not enforced.
    pub fn next_invoice_number(&self, day: NaiveDate, prefix: &str) -> Result<String> {
        let issued_that_day = self
            .get_all()?
            .iter()
            .filter(|invoice| invoice.date.date_naive() == day)
            .count();

        Ok(format!(
            "{}-{}-{:03}",
            prefix,
            day.format("%Y%m%d"),
            issued_that_day + 1
        ))
    }

    /// Billing summary across one client's invoices
    pub fn client_stats(&self, client_id: &str) -> Result<ClientStats> {
        Ok(ClientStats::from_invoices(&self.get_by_client_id(client_id)?))
    }
}
