//! Generic object store over a [`KeyValueStore`]
//!
//! Records live under `"<collection>:<id>"` and are stored as JSON. A
//! collection is just a key prefix, so there is no schema registry; the price
//! is a full prefix scan for `get_all` and for any foreign-key query.

use crate::core::error::{Result, StoreError};
use crate::core::service::{IdGenerator, KeyValueStore, UuidGenerator};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Separator between collection name and id in substrate keys
pub const KEY_SEPARATOR: char = ':';

const ID_FIELD: &str = "id";

/// Collection-namespaced save/get/list/delete over a key-value substrate
///
/// The store keeps no cache. Every read goes back to the substrate.
#[derive(Clone)]
pub struct ObjectStore {
    substrate: Arc<dyn KeyValueStore>,
    ids: Arc<dyn IdGenerator>,
}

impl ObjectStore {
    /// Create a store generating UUID v4 ids
    pub fn new(substrate: Arc<dyn KeyValueStore>) -> Self {
        Self {
            substrate,
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Replace the identifier generator
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// The underlying substrate
    pub fn substrate(&self) -> &Arc<dyn KeyValueStore> {
        &self.substrate
    }

    /// Generate a fresh identifier
    pub fn generate_id(&self) -> String {
        self.ids.generate()
    }

    /// Build the substrate key for a record
    pub fn record_key(collection: &str, id: &str) -> String {
        format!("{}{}{}", collection, KEY_SEPARATOR, id)
    }

    fn collection_prefix(collection: &str) -> String {
        format!("{}{}", collection, KEY_SEPARATOR)
    }

    fn check_collection(collection: &str) -> Result<()> {
        if collection.is_empty() {
            return Err(StoreError::MissingCollection.into());
        }
        Ok(())
    }

    fn check_id(collection: &str, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(StoreError::MissingId {
                collection: collection.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Serialize `object` under `collection`, returning the key written
    ///
    /// A fresh id is generated when `id` is `None`.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        object: &T,
        id: Option<&str>,
    ) -> Result<String> {
        Self::check_collection(collection)?;

        let value = serde_json::to_value(object)?;
        if !value.is_object() {
            return Err(StoreError::NotAnObject {
                collection: collection.to_string(),
            }
            .into());
        }

        let id = match id {
            Some(id) => {
                Self::check_id(collection, id)?;
                id.to_string()
            }
            None => self.generate_id(),
        };

        let key = Self::record_key(collection, &id);
        self.substrate.put(&key, &serde_json::to_string(&value)?)?;
        tracing::debug!(collection, key = %key, "saved record");
        Ok(key)
    }

    fn get_raw(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Self::check_collection(collection)?;
        Self::check_id(collection, id)?;

        let key = Self::record_key(collection, id);
        match self.substrate.get(&key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load a record; `None` when the key does not exist
    pub fn get_by_id<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        match self.get_raw(collection, id)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => {
                tracing::debug!(collection, id, "record not found");
                Ok(None)
            }
        }
    }

    /// Every record in `collection`, in substrate enumeration order
    pub fn get_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        Self::check_collection(collection)?;

        let keys = self
            .substrate
            .keys_with_prefix(&Self::collection_prefix(collection))?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            // A key can vanish between enumeration and read
            if let Some(json) = self.substrate.get(&key)? {
                records.push(serde_json::from_str(&json)?);
            }
        }

        tracing::debug!(collection, count = records.len(), "scanned collection");
        Ok(records)
    }

    /// Number of records in `collection`
    pub fn count(&self, collection: &str) -> Result<usize> {
        Self::check_collection(collection)?;
        Ok(self
            .substrate
            .keys_with_prefix(&Self::collection_prefix(collection))?
            .len())
    }

    /// Remove a record. Unknown ids are a no-op.
    pub fn delete_by_id(&self, collection: &str, id: &str) -> Result<()> {
        Self::check_collection(collection)?;
        Self::check_id(collection, id)?;

        let key = Self::record_key(collection, id);
        self.substrate.delete(&key)?;
        tracing::debug!(collection, key = %key, "deleted record");
        Ok(())
    }

    /// Shallow-merge the fields of `patch` over the stored record
    ///
    /// Top-level fields present in `patch` replace the stored ones, everything
    /// else is kept untouched (including fields `T` does not know about). The
    /// `id` field is fixed at creation and an `id` in `patch` is ignored.
    /// Returns `None` when no record exists at `id`.
    pub fn merge_by_id<T, P>(&self, collection: &str, id: &str, patch: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let Some(stored) = self.get_raw(collection, id)? else {
            tracing::debug!(collection, id, "merge skipped, record not found");
            return Ok(None);
        };

        let Value::Object(mut fields) = stored else {
            return Err(StoreError::NotAnObject {
                collection: collection.to_string(),
            }
            .into());
        };

        let Value::Object(mut changes) = serde_json::to_value(patch)? else {
            return Err(StoreError::NotAnObject {
                collection: collection.to_string(),
            }
            .into());
        };
        if changes.remove(ID_FIELD).is_some() {
            tracing::warn!(collection, id, "ignored id in patch");
        }

        merge_fields(&mut fields, changes);

        let merged = Value::Object(fields);
        let record: T = serde_json::from_value(merged.clone())?;
        self.save(collection, &merged, Some(id))?;
        Ok(Some(record))
    }

    /// Remove every record of `collection`
    pub fn clear_collection(&self, collection: &str) -> Result<()> {
        Self::check_collection(collection)?;

        let keys = self
            .substrate
            .keys_with_prefix(&Self::collection_prefix(collection))?;
        for key in &keys {
            self.substrate.delete(key)?;
        }

        tracing::info!(collection, removed = keys.len(), "cleared collection");
        Ok(())
    }

    /// Remove every key in the substrate
    pub fn clear_all(&self) -> Result<()> {
        self.substrate.clear()?;
        tracing::info!(backend = self.substrate.backend_name(), "cleared all records");
        Ok(())
    }
}

fn merge_fields(target: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (field, value) in changes {
        target.insert(field, value);
    }
}
