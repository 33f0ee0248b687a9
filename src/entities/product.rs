//! Product catalogue records

use crate::core::error::{Result, ValidationError};
use crate::core::validation::validators::{non_empty, non_negative};
use crate::core::validation::{FieldChecks, Validate};
use crate::core::{Entity, ProductLookup};
use crate::entities::repository::Repository;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A billable product or service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Tax rate in percent; records written without one read back as 0
    #[serde(default)]
    pub tax_percent: f64,
}

impl Entity for Product {
    type Patch = ProductPatch;

    fn collection() -> &'static str {
        "Product"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Data required to create a product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub tax_percent: Option<f64>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tax(mut self, tax_percent: f64) -> Self {
        self.tax_percent = Some(tax_percent);
        self
    }
}

impl Product {
    pub fn from_input(id: String, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            tax_percent: input.tax_percent.unwrap_or(0.0),
        }
    }
}

impl Validate for ProductInput {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        FieldChecks::new()
            .check("name", &json!(self.name), non_empty())
            .check("price", &json!(self.price), non_negative())
            .check("taxPercent", &json!(self.tax_percent), non_negative())
            .finish()
    }
}

/// Partial update for a product
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,
}

pub type ProductRepository = Repository<Product>;

impl Repository<Product> {
    /// Create and persist a product under a fresh id
    pub fn create(&self, input: ProductInput) -> Result<Product> {
        let product = Product::from_input(self.generate_id(), input);
        tracing::debug!(id = %product.id, "creating product");
        self.save(&product)
    }
}

impl ProductLookup for Repository<Product> {
    fn product(&self, id: &str) -> Option<Product> {
        match self.get_by_id(id) {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(id, error = %e, "product lookup failed");
                None
            }
        }
    }
}
