//! The issuing company: a singleton record stored under a fixed id

use crate::core::error::{EntityError, Result, ValidationError};
use crate::core::field::FieldFormat;
use crate::core::validation::validators::{format, non_empty};
use crate::core::validation::{FieldChecks, Validate};
use crate::core::Entity;
use crate::entities::repository::Repository;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Fixed id of the company record
pub const COMPANY_ID: &str = "default";

/// Currencies an invoice can default to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Sek,
    Nzd,
    Inr,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Sek => "SEK",
            Currency::Nzd => "NZD",
            Currency::Inr => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyAddress {
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
}

/// Company identity printed on every invoice
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub address: CompanyAddress,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub tax_identity_type: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    /// Encoded logo image
    #[serde(default)]
    pub logo_base64: String,
    #[serde(default)]
    pub default_currency: Currency,
}

/// Setup data has the same shape as the stored record
pub type CompanyData = Company;

impl Entity for Company {
    type Patch = CompanyPatch;

    fn collection() -> &'static str {
        "Company"
    }

    fn id(&self) -> &str {
        COMPANY_ID
    }
}

fn optional_text(value: &str) -> Value {
    if value.is_empty() { Value::Null } else { json!(value) }
}

impl Validate for Company {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        FieldChecks::new()
            .check("name", &json!(self.name), non_empty())
            .check("email", &optional_text(&self.email), format(FieldFormat::Email))
            .check("website", &optional_text(&self.website), format(FieldFormat::Url))
            .check("address.city", &json!(self.address.city), non_empty())
            .check("address.country", &json!(self.address.country), non_empty())
            .finish()
    }
}

/// Partial update for the company settings
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CompanyAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_identity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<Currency>,
}

pub type CompanyRepository = Repository<Company>;

impl Repository<Company> {
    /// Construct-or-load the company record
    ///
    /// - a stored record exists: it is returned and `data` is ignored
    /// - nothing stored, `data` given: `data` is persisted and returned
    /// - nothing stored, no `data`: [`EntityError::CompanyNotConfigured`]
    pub fn initialize(&self, data: Option<CompanyData>) -> Result<Company> {
        if let Some(existing) = self.get()? {
            if data.is_some() {
                tracing::debug!("company already set up, keeping stored record");
            }
            return Ok(existing);
        }

        let Some(company) = data else {
            return Err(EntityError::CompanyNotConfigured.into());
        };

        self.save(&company)?;
        tracing::info!(name = %company.name, "company set up");
        Ok(company)
    }

    /// Load the stored company; an error if setup never happened
    pub fn load(&self) -> Result<Company> {
        self.initialize(None)
    }

    /// The stored company, if any
    pub fn get(&self) -> Result<Option<Company>> {
        self.get_by_id(COMPANY_ID)
    }

    /// Whether setup has completed. Storage failures count as "not set up".
    pub fn is_setup(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }

    /// Shallow-merge settings changes into the stored company
    pub fn update(&self, patch: &CompanyPatch) -> Result<Company> {
        self.update_by_id(COMPANY_ID, patch)?
            .ok_or_else(|| EntityError::CompanyNotConfigured.into())
    }
}
