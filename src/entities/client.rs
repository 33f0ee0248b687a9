//! Client records

use crate::core::error::{Result, ValidationError};
use crate::core::field::FieldFormat;
use crate::core::validation::validators::{format, non_empty};
use crate::core::validation::{FieldChecks, Validate};
use crate::core::{ClientLookup, Entity};
use crate::entities::repository::Repository;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Postal address of a client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

/// A customer invoices are issued to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: ClientAddress,
    #[serde(rename = "taxID", default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Entity for Client {
    type Patch = ClientPatch;

    fn collection() -> &'static str {
        "Client"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Data required to create a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: ClientAddress,
    #[serde(rename = "taxID", default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Client {
    /// Build a client record from its creation input
    pub fn from_input(id: String, input: ClientInput) -> Self {
        Self {
            id,
            name: input.name,
            contact_person: input.contact_person,
            email: input.email,
            phone: input.phone,
            address: input.address,
            tax_id: input.tax_id,
            notes: input.notes,
        }
    }

    /// Address parts joined with ", ", skipping empty ones
    pub fn formatted_address(&self) -> String {
        let a = &self.address;
        [
            a.building.as_deref(),
            a.street.as_deref(),
            Some(a.city.as_str()),
            Some(a.state.as_str()),
            Some(a.zip_code.as_str()),
            Some(a.country.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl Validate for ClientInput {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        FieldChecks::new()
            .check("name", &json!(self.name), non_empty())
            .check("email", &json!(self.email), non_empty())
            .check("email", &json!(self.email), format(FieldFormat::Email))
            .check("address.city", &json!(self.address.city), non_empty())
            .check("address.state", &json!(self.address.state), non_empty())
            .check("address.country", &json!(self.address.country), non_empty())
            .check("address.zipCode", &json!(self.address.zip_code), non_empty())
            .finish()
    }
}

/// Partial update for a client
///
/// `None` leaves a field untouched. For optional fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<ClientAddress>,
    #[serde(rename = "taxID", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub type ClientRepository = Repository<Client>;

impl Repository<Client> {
    /// Create and persist a client under a fresh id
    pub fn create(&self, input: ClientInput) -> Result<Client> {
        let client = Client::from_input(self.generate_id(), input);
        tracing::debug!(id = %client.id, "creating client");
        self.save(&client)
    }
}

impl ClientLookup for Repository<Client> {
    fn client(&self, id: &str) -> Option<Client> {
        match self.get_by_id(id) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(id, error = %e, "client lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ClientInput {
        ClientInput {
            name: "Acme".to_string(),
            email: "billing@acme.test".to_string(),
            address: ClientAddress {
                building: Some("Unit 4".to_string()),
                street: None,
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                country: "US".to_string(),
                zip_code: "62701".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_serializes_camel_case_field_names() {
        let mut client = Client::from_input("c1".to_string(), input());
        client.tax_id = Some("TX-9".to_string());

        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["taxID"], "TX-9");
        assert_eq!(json["address"]["zipCode"], "62701");
        assert!(json.get("contactPerson").is_none());
        assert_eq!(json["notes"], "");
    }

    #[test]
    fn test_formatted_address_skips_missing_parts() {
        let client = Client::from_input("c1".to_string(), input());
        assert_eq!(client.formatted_address(), "Unit 4, Springfield, IL, 62701, US");
    }

    #[test]
    fn test_validate_input() {
        assert!(input().validate().is_ok());

        let mut bad = input();
        bad.email = "not-an-email".to_string();
        bad.name = " ".to_string();
        assert!(matches!(bad.validate(), Err(ValidationError::FieldErrors(_))));
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch = ClientPatch {
            phone: Some(None),
            notes: Some("vip".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, json!({"phone": null, "notes": "vip"}));
    }
}
