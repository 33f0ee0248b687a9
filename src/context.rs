//! Application context: the store, the repositories and the company record
//!
//! The company is loaded (or set up) while the context is built, so every
//! dependent read sees a configured company.
//!
//! ```rust,ignore
//! let book = Billbook::builder()
//!     .with_config(BillbookConfig::from_yaml_file("billbook.yaml")?)
//!     .with_company(company_data)
//!     .build()?;
//!
//! let number = book.next_invoice_number(Utc::now().date_naive())?;
//! ```

use crate::billing::InvoiceDraft;
use crate::config::BillbookConfig;
use crate::core::error::Result;
use crate::core::{Clock, IdGenerator, KeyValueStore, ObjectStore, SystemClock};
use crate::entities::{
    ClientRepository, Company, CompanyData, CompanyPatch, CompanyRepository, Invoice,
    InvoiceInput, InvoiceRepository, ProductRepository,
};
use crate::query::{InvoiceFilters, InvoiceQuery, InvoiceRow, SortSpec};
use chrono::NaiveDate;
use std::sync::Arc;

/// Builder for [`Billbook`]
pub struct BillbookBuilder {
    config: BillbookConfig,
    substrate: Option<Arc<dyn KeyValueStore>>,
    ids: Option<Arc<dyn IdGenerator>>,
    clock: Arc<dyn Clock>,
    company: Option<CompanyData>,
}

impl Default for BillbookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillbookBuilder {
    pub fn new() -> Self {
        Self {
            config: BillbookConfig::default_config(),
            substrate: None,
            ids: None,
            clock: Arc::new(SystemClock),
            company: None,
        }
    }

    pub fn with_config(mut self, config: BillbookConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this substrate instead of the one named in the configuration
    pub fn with_substrate(self, substrate: impl KeyValueStore + 'static) -> Self {
        self.with_shared_substrate(Arc::new(substrate))
    }

    /// Use a substrate that other handles may also hold
    pub fn with_shared_substrate(mut self, substrate: Arc<dyn KeyValueStore>) -> Self {
        self.substrate = Some(substrate);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Company data used only when no company has been set up yet
    pub fn with_company(mut self, company: CompanyData) -> Self {
        self.company = Some(company);
        self
    }

    /// Open the substrate and construct-or-load the company
    ///
    /// Fails with `CompanyNotConfigured` when nothing is stored and no
    /// company data was given.
    pub fn build(self) -> Result<Billbook> {
        self.config.validate()?;

        let substrate = match self.substrate {
            Some(substrate) => substrate,
            None => self.config.open_substrate()?,
        };
        let mut store = ObjectStore::new(substrate);
        if let Some(ids) = self.ids {
            store = store.with_id_generator(ids);
        }

        let company_repository = CompanyRepository::new(store.clone());
        let company = company_repository.initialize(self.company)?;

        tracing::info!(
            backend = store.substrate().backend_name(),
            company = %company.name,
            "billbook ready"
        );

        Ok(Billbook {
            clients: ClientRepository::new(store.clone()),
            products: ProductRepository::new(store.clone()),
            invoices: InvoiceRepository::new(store.clone()),
            company_repository,
            company,
            config: self.config,
            clock: self.clock,
            store,
        })
    }
}

/// An initialized invoicing context
pub struct Billbook {
    config: BillbookConfig,
    store: ObjectStore,
    clock: Arc<dyn Clock>,
    clients: ClientRepository,
    products: ProductRepository,
    invoices: InvoiceRepository,
    company_repository: CompanyRepository,
    company: Company,
}

impl Billbook {
    pub fn builder() -> BillbookBuilder {
        BillbookBuilder::new()
    }

    pub fn config(&self) -> &BillbookConfig {
        &self.config
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn clients(&self) -> &ClientRepository {
        &self.clients
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn invoices(&self) -> &InvoiceRepository {
        &self.invoices
    }

    /// The company loaded at build time
    pub fn company(&self) -> &Company {
        &self.company
    }

    /// Persist company changes and refresh the loaded copy
    pub fn update_company(&mut self, patch: &CompanyPatch) -> Result<&Company> {
        self.company = self.company_repository.update(patch)?;
        Ok(&self.company)
    }

    /// Start an invoice editor pricing lines from the product repository
    pub fn invoice_draft(&self) -> InvoiceDraft<'_, ProductRepository> {
        InvoiceDraft::new(&self.products)
    }

    /// Create an invoice using the configured due-date offset and clock
    pub fn create_invoice(&self, input: InvoiceInput) -> Result<Invoice> {
        self.invoices
            .create_with(input, &self.config.invoices, self.clock.as_ref())
    }

    /// Next invoice number for `day` using the configured prefix
    pub fn next_invoice_number(&self, day: NaiveDate) -> Result<String> {
        self.invoices
            .next_invoice_number(day, &self.config.invoices.number_prefix)
    }

    /// Next invoice number for the clock's current UTC day
    pub fn next_invoice_number_today(&self) -> Result<String> {
        self.next_invoice_number(self.clock.now().date_naive())
    }

    /// Query engine resolving client names through the client repository
    pub fn invoice_query(&self) -> InvoiceQuery<'_, ClientRepository> {
        InvoiceQuery::new(&self.clients)
    }

    /// All invoices through the listing pipeline; `None` uses the configured
    /// default sort
    pub fn list_invoices(
        &self,
        filters: &InvoiceFilters,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.get_all()?;
        let sort = sort.unwrap_or(&self.config.listing.sort);
        Ok(self.invoice_query().apply(&invoices, filters, Some(sort)))
    }

    /// Listed invoices projected onto the configured columns
    pub fn invoice_rows(
        &self,
        filters: &InvoiceFilters,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<InvoiceRow>> {
        let listed = self.list_invoices(filters, sort)?;
        Ok(self
            .invoice_query()
            .project(&listed, &self.config.listing.columns))
    }
}
