//! Shared test harness for substrate and repository testing
//!
//! Provides deterministic collaborators (`SequentialIds`, `FixedClock`),
//! sample entity inputs, and two macro-generated contract suites:
//!
//! - `key_value_store_tests!` validates a `KeyValueStore` implementation
//! - `repository_tests!` runs the repository contract over a substrate
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! key_value_store_tests!(InMemoryKeyValueStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod key_value_store_tests;
#[macro_use]
pub mod repository_tests;

use billbook::billing::{Billing, LineItemDraft, compute};
use billbook::core::{Clock, IdGenerator, KeyValueStore, ObjectStore};
use billbook::entities::{
    ClientAddress, ClientInput, CompanyAddress, CompanyData, Currency, Product, ProductInput,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ---------------------------------------------------------------------------
// Deterministic collaborators
// ---------------------------------------------------------------------------

/// Ids `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: &'static str,
    next: AtomicUsize,
}

impl SequentialIds {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicUsize::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-01-15 10:00:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

/// Object store over `substrate` with sequential ids
pub fn sequential_store(substrate: Arc<dyn KeyValueStore>) -> ObjectStore {
    ObjectStore::new(substrate).with_id_generator(Arc::new(SequentialIds::new("id")))
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn sample_client_input(name: &str) -> ClientInput {
    ClientInput {
        name: name.to_string(),
        contact_person: Some("Jane Doe".to_string()),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: Some("+1 555 0100".to_string()),
        address: ClientAddress {
            building: None,
            street: Some("1 Main St".to_string()),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
        },
        tax_id: Some("US-123".to_string()),
        notes: "net 30".to_string(),
    }
}

pub fn sample_product_input(name: &str, price: f64, tax_percent: f64) -> ProductInput {
    ProductInput::new(name, price)
        .with_description(format!("{} service", name))
        .with_tax(tax_percent)
}

pub fn sample_company() -> CompanyData {
    CompanyData {
        name: "Northwind Studio".to_string(),
        address: CompanyAddress {
            street: "42 Harbour Rd".to_string(),
            city: "Bristol".to_string(),
            country: "UK".to_string(),
            zip: "BS1 4DJ".to_string(),
            ..Default::default()
        },
        email: "billing@northwind.example".to_string(),
        default_currency: Currency::Gbp,
        ..Default::default()
    }
}

/// Billing for `quantity` units of `product`
pub fn billing_for(product: &Product, quantity: f64) -> Billing {
    let mut line = LineItemDraft::from_product(product);
    line.set_quantity(quantity);
    compute(&[line], std::slice::from_ref(product))
}
