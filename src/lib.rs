//! # Billbook
//!
//! A local-first invoicing core: clients, products, invoices and a company
//! profile stored as JSON records over a pluggable key-value substrate, plus
//! invoice totals and a filter/sort/projection pipeline for invoice listings.
//!
//! ## Features
//!
//! - **Flat key layout**: every record lives under `"<Collection>:<id>"`
//! - **Partial updates**: shallow merge of the changed fields only
//! - **Consistent amounts**: `subtotal`, `tax` and `total` are only ever
//!   written together, from a computed [`billing::Billing`]
//! - **Per-line tax**: each line is taxed at its own product's rate
//! - **Listing pipeline**: search, status/client/date/amount facets, stable
//!   sort and column projection
//! - **Substrates**: in-memory map (default) or LMDB (`lmdb` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billbook::prelude::*;
//!
//! let book = Billbook::builder()
//!     .with_company(CompanyData {
//!         name: "Acme Ltd".to_string(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let product = book
//!     .products()
//!     .create(ProductInput::new("Consulting", 100.0).with_tax(10.0))?;
//!
//! let mut draft = book.invoice_draft();
//! let line = draft.add_product(&product.id).unwrap();
//! draft.set_quantity(&line, 2.0);
//!
//! let number = book.next_invoice_number_today()?;
//! let invoice = book.create_invoice(InvoiceInput::new(client_id, number, draft.billing()))?;
//! assert_eq!(invoice.total, 220.0);
//! ```

pub mod billing;
pub mod config;
pub mod context;
pub mod core;
pub mod entities;
pub mod query;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BillbookError, Clock, ClientLookup, ConfigError, Entity, EntityError, FieldFormat,
        FieldValue, IdGenerator, KeyValueStore, ObjectStore, ProductLookup, StoreError,
        SystemClock, UuidGenerator, Validate, ValidationError,
    };

    // === Entities ===
    pub use crate::entities::{
        Client, ClientAddress, ClientInput, ClientPatch, ClientRepository, Company,
        CompanyAddress, CompanyData, CompanyPatch, CompanyRepository, Currency, Invoice,
        InvoiceInput, InvoicePatch, InvoiceRepository, InvoiceStatus, LineItem, Product,
        ProductInput, ProductPatch, ProductRepository, Repository,
    };

    // === Billing ===
    pub use crate::billing::{Billing, InvoiceDraft, LineItemDraft, Totals, compute, compute_totals};

    // === Query ===
    pub use crate::query::{
        AmountRange, ClientStats, Column, ColumnSet, DateRange, InvoiceFilters, InvoiceQuery, InvoiceRow, SortDirection,
        SortKey, SortSpec, active_filter_count,
    };

    // === Storage ===
    pub use crate::storage::InMemoryKeyValueStore;
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbKeyValueStore;

    // === Config & context ===
    pub use crate::config::{BillbookConfig, InvoiceSettings, StorageBackend};
    pub use crate::context::{Billbook, BillbookBuilder};

    // === External dependencies ===
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
}
