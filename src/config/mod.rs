//! Configuration loading and management

use crate::core::KeyValueStore;
use crate::core::error::{ConfigError, Result as BillbookResult};
use crate::query::{ColumnSet, SortSpec};
use crate::storage::InMemoryKeyValueStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which key-value substrate backs the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    #[default]
    Memory,
    /// LMDB environment on disk (requires the `lmdb` feature)
    Lmdb,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Lmdb => "lmdb",
        }
    }
}

/// Storage section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory of the LMDB environment; ignored by the memory backend
    pub path: Option<PathBuf>,
}

/// Upper bound for `invoices.due_in_days` (ten years)
pub const MAX_DUE_IN_DAYS: i64 = 3650;

/// Defaults applied when creating invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    /// Days between the invoice date and its default due date
    pub due_in_days: i64,

    /// Prefix of generated invoice numbers (`<prefix>-YYYYMMDD-NNN`)
    pub number_prefix: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            due_in_days: 30,
            number_prefix: "INV".to_string(),
        }
    }
}

/// Defaults for the invoice listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Sort expression, e.g. `date:desc`
    pub sort: SortSpec,

    /// Visible columns, in display order
    pub columns: ColumnSet,
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillbookConfig {
    pub storage: StorageConfig,
    pub invoices: InvoiceSettings,
    pub listing: ListingSettings,
}

impl BillbookConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration (in-memory storage, 30-day terms)
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Check value ranges and backend requirements
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(0..=MAX_DUE_IN_DAYS).contains(&self.invoices.due_in_days) {
            return Err(ConfigError::InvalidValue {
                field: "invoices.due_in_days".to_string(),
                message: format!("must be between 0 and {}", MAX_DUE_IN_DAYS),
            });
        }

        if self.invoices.number_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "invoices.number_prefix".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Lmdb && self.storage.path.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "storage.path".to_string(),
                message: "required for the lmdb backend".to_string(),
            });
        }

        Ok(())
    }

    /// Open the configured substrate
    pub fn open_substrate(&self) -> BillbookResult<Arc<dyn KeyValueStore>> {
        match self.storage.backend {
            StorageBackend::Memory => Ok(Arc::new(InMemoryKeyValueStore::new())),
            StorageBackend::Lmdb => self.open_lmdb(),
        }
    }

    #[cfg(feature = "lmdb")]
    fn open_lmdb(&self) -> BillbookResult<Arc<dyn KeyValueStore>> {
        let path = self
            .storage
            .path
            .as_ref()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "storage.path".to_string(),
                message: "required for the lmdb backend".to_string(),
            })?;
        std::fs::create_dir_all(path).map_err(|e| {
            crate::core::StoreError::backend(StorageBackend::Lmdb.as_str(), e)
        })?;
        Ok(Arc::new(crate::storage::LmdbKeyValueStore::open(path)?))
    }

    #[cfg(not(feature = "lmdb"))]
    fn open_lmdb(&self) -> BillbookResult<Arc<dyn KeyValueStore>> {
        Err(ConfigError::BackendUnavailable {
            backend: StorageBackend::Lmdb.as_str().to_string(),
        }
        .into())
    }
}
