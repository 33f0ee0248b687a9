//! Domain entities and their repositories
//!
//! | Entity    | Collection | Id                |
//! |-----------|------------|-------------------|
//! | `Client`  | `Client`   | random UUID       |
//! | `Product` | `Product`  | random UUID       |
//! | `Invoice` | `Invoice`  | random UUID       |
//! | `Company` | `Company`  | always `default`  |

pub mod client;
pub mod company;
pub mod invoice;
pub mod product;
pub mod repository;

pub use client::{Client, ClientAddress, ClientInput, ClientPatch, ClientRepository};
pub use company::{
    COMPANY_ID, Company, CompanyAddress, CompanyData, CompanyPatch, CompanyRepository, Currency,
};
pub use invoice::{
    Invoice, InvoiceInput, InvoicePatch, InvoiceRepository, InvoiceStatus, LineItem,
};
pub use product::{Product, ProductInput, ProductPatch, ProductRepository};
pub use repository::Repository;
