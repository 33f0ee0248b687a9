//! Quickstart: set up a company, bill a client and list invoices
//!
//! Run with `RUST_LOG=billbook=debug` to see store traffic.

use anyhow::Result;
use billbook::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🧾 Billbook Quickstart\n");

    let mut config = BillbookConfig::default_config();
    config.invoices.due_in_days = 14;

    let book = Billbook::builder()
        .with_config(config)
        .with_company(CompanyData {
            name: "Northwind Studio".to_string(),
            email: "billing@northwind.example".to_string(),
            default_currency: Currency::Eur,
            ..Default::default()
        })
        .build()?;

    // Catalogue
    let design = book
        .products()
        .create(ProductInput::new("Design sprint", 1200.0).with_tax(20.0))?;
    let hosting = book
        .products()
        .create(ProductInput::new("Hosting (monthly)", 40.0).with_description("Managed VPS"))?;

    // Clients
    let acme = book.clients().create(ClientInput {
        name: "Acme Corp".to_string(),
        email: "ap@acme.example".to_string(),
        address: ClientAddress {
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
            ..Default::default()
        },
        ..Default::default()
    })?;
    let zeta = book.clients().create(ClientInput {
        name: "Zeta Labs".to_string(),
        email: "finance@zeta.example".to_string(),
        ..Default::default()
    })?;

    // Two invoices for Acme, one for Zeta
    for (client, quantities) in [(&acme, [1.0, 3.0]), (&acme, [2.0, 12.0]), (&zeta, [0.0, 6.0])] {
        let mut draft = book.invoice_draft();
        for (product, quantity) in [(&design, quantities[0]), (&hosting, quantities[1])] {
            if let Some(line) = draft.add_product(&product.id) {
                draft.set_quantity(&line, quantity);
            }
        }

        let totals = draft.totals();
        let number = book.next_invoice_number_today()?;
        let invoice = book.create_invoice(InvoiceInput::new(&client.id, number, draft.billing()))?;
        println!(
            "✅ {} for {}: subtotal {:.2}, tax {:.2}, total {:.2}",
            invoice.invoice_number, client.name, totals.subtotal, totals.tax, totals.total
        );
    }

    // Mark the first Acme invoice paid
    let acme_invoices = book.invoices().get_by_client_id(&acme.id)?;
    if let Some(first) = acme_invoices.first() {
        book.invoices().update_status_by_id(&first.id, InvoiceStatus::Paid)?;
    }

    println!("\n📋 Unpaid invoices over 100, largest first:");
    let filters = InvoiceFilters::new()
        .with_status(InvoiceStatus::Draft)
        .with_status(InvoiceStatus::Sent)
        .with_amount_range(Some(100.0), None);
    let sort = SortSpec::parse("total:desc").map_err(anyhow::Error::msg)?;
    println!("   ({} active filters)", active_filter_count(&filters));

    for row in book.invoice_rows(&filters, Some(&sort))? {
        let cells: Vec<String> = row
            .fields
            .iter()
            .map(|(column, value)| {
                Ok(format!("{}={}", column.as_str(), serde_json::to_string(value)?))
            })
            .collect::<Result<_, serde_json::Error>>()?;
        println!("   {}", cells.join("  "));
    }

    let stats = book.invoices().client_stats(&acme.id)?;
    println!(
        "\n📊 {}: {} invoices, {:.2} billed, {:.0}% paid",
        acme.name, stats.total_invoices, stats.total_amount, stats.payment_rate
    );

    Ok(())
}
