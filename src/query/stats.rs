//! Per-client billing summary

use crate::entities::{Invoice, InvoiceStatus};
use serde::Serialize;

/// Aggregates over a set of invoices (usually one client's)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub total_invoices: usize,
    pub total_amount: f64,
    pub paid_invoices: usize,
    pub paid_amount: f64,
    pub unpaid_amount: f64,
    /// Sent or overdue
    pub outstanding_invoices: usize,
    pub average_amount: f64,
    /// Paid invoices as a percentage of all invoices
    pub payment_rate: f64,
}

impl ClientStats {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let total_invoices = invoices.len();
        let total_amount: f64 = invoices.iter().map(|i| i.total).sum();

        let paid: Vec<&Invoice> = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .collect();
        let paid_amount: f64 = paid.iter().map(|i| i.total).sum();

        let outstanding_invoices = invoices.iter().filter(|i| i.status.is_outstanding()).count();

        let (average_amount, payment_rate) = if total_invoices > 0 {
            (
                total_amount / total_invoices as f64,
                paid.len() as f64 / total_invoices as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_invoices,
            total_amount,
            paid_invoices: paid.len(),
            paid_amount,
            unpaid_amount: total_amount - paid_amount,
            outstanding_invoices,
            average_amount,
            payment_rate,
        }
    }
}
