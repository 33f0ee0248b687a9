//! Typed error handling for billbook
//!
//! Callers get concrete error categories instead of a generic
//! `anyhow::Error`, so they can tell a contract violation apart from a
//! missing record or a broken backend.
//!
//! # Error Categories
//!
//! - [`StoreError`]: object store and key-value substrate failures, including
//!   programmer errors such as an empty collection name
//! - [`EntityError`]: entity-level conditions raised by the "assert exists"
//!   helpers and the company singleton
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: input validation for collaborator-supplied data
//!
//! Absence is NOT an error: `get_by_id`/`update_by_id` on an unknown id return
//! `Ok(None)`.
//!
//! # Example
//!
//! ```rust,ignore
//! use billbook::prelude::*;
//!
//! match clients.require_by_id("missing") {
//!     Ok(client) => println!("Found: {}", client.name),
//!     Err(BillbookError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("Client {} not found", id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result alias used by the store, repositories and context.
pub type Result<T> = std::result::Result<T, BillbookError>;

/// The main error type for billbook
#[derive(Debug, Error)]
pub enum BillbookError {
    /// Object store / substrate errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Entity-related errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Serializable error summary, handy for collaborators that surface
/// notifications.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BillbookError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BillbookError::Store(e) => e.error_code(),
            BillbookError::Entity(e) => e.error_code(),
            BillbookError::Config(_) => "CONFIG_ERROR",
            BillbookError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// True for caller contract violations that must never be recovered from.
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            BillbookError::Store(
                StoreError::MissingCollection | StoreError::MissingId { .. } | StoreError::NotAnObject { .. }
            )
        )
    }

    /// Convert to a report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BillbookError::Entity(EntityError::NotFound { collection, id }) => {
                Some(serde_json::json!({
                    "collection": collection,
                    "id": id,
                }))
            }
            BillbookError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BillbookError {
    fn from(err: serde_json::Error) -> Self {
        BillbookError::Store(StoreError::Serialization {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for BillbookError {
    fn from(err: serde_yaml::Error) -> Self {
        BillbookError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors raised by the object store and the key-value substrate
#[derive(Debug, Error)]
pub enum StoreError {
    /// Collection name was empty (programmer error)
    #[error("collection name is missing")]
    MissingCollection,

    /// Record id was empty (programmer error)
    #[error("id is missing for collection '{collection}'")]
    MissingId { collection: String },

    /// The value handed to `save` does not serialize to a JSON object
    /// (programmer error)
    #[error("value saved to '{collection}' is not an object")]
    NotAnObject { collection: String },

    /// Failed to serialize or deserialize a record
    #[error("serialization failed: {message}")]
    Serialization { message: String },

    /// The substrate itself failed
    #[error("storage backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::MissingCollection => "MISSING_COLLECTION",
            StoreError::MissingId { .. } => "MISSING_ID",
            StoreError::NotAnObject { .. } => "NOT_AN_OBJECT",
            StoreError::Serialization { .. } => "SERIALIZATION_ERROR",
            StoreError::Backend { .. } => "STORAGE_ERROR",
        }
    }

    /// Wrap any displayable backend failure
    pub fn backend(backend: &str, err: impl std::fmt::Display) -> Self {
        StoreError::Backend {
            backend: backend.to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found where its presence was asserted
    #[error("{collection} with id '{id}' not found")]
    NotFound { collection: String, id: String },

    /// The company record was loaded before setup completed
    #[error("company data is required: no company has been set up yet")]
    CompanyNotConfigured,
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::CompanyNotConfigured => "COMPANY_NOT_CONFIGURED",
        }
    }

    pub fn not_found(collection: &str, id: &str) -> Self {
        EntityError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse the configuration document
    #[error("failed to parse configuration: {message}")]
    ParseError { message: String },

    /// A configuration value is not acceptable
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Backend requested that this build does not include
    #[error("storage backend '{backend}' is not enabled in this build")]
    BackendUnavailable { backend: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field error
    #[error("validation failed for '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field errors, keyed by field name
    #[error("validation failed for {} field(s)", .0.len())]
    FieldErrors(BTreeMap<String, Vec<String>>),
}

impl ValidationError {
    /// Build from collected field errors. Returns `None` when nothing failed.
    pub fn from_fields(errors: BTreeMap<String, Vec<String>>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        if errors.len() == 1 {
            let (field, messages) = errors.iter().next()?;
            if messages.len() == 1 {
                return Some(ValidationError::FieldError {
                    field: field.clone(),
                    message: messages[0].clone(),
                });
            }
        }
        Some(ValidationError::FieldErrors(errors))
    }
}
