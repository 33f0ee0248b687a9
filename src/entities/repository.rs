//! Generic typed repository over the object store

use crate::core::error::{EntityError, Result};
use crate::core::{Entity, ObjectStore};
use std::marker::PhantomData;

/// Typed façade over [`ObjectStore`] for one entity kind
///
/// Holds no cached records: two reads of the same id may observe different
/// data if a write happened in between.
pub struct Repository<T: Entity> {
    store: ObjectStore,
    _marker: PhantomData<T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: ObjectStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// The object store backing this repository
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Persist `entity` under its own id, replacing any previous record
    pub fn save(&self, entity: &T) -> Result<T> {
        self.store.save(T::collection(), entity, Some(entity.id()))?;
        Ok(entity.clone())
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        self.store.get_by_id(T::collection(), id)
    }

    /// Like `get_by_id` but a missing record is an error
    pub fn require_by_id(&self, id: &str) -> Result<T> {
        self.get_by_id(id)?
            .ok_or_else(|| EntityError::not_found(T::collection(), id).into())
    }

    /// All records; order is whatever the substrate enumerates
    pub fn get_all(&self) -> Result<Vec<T>> {
        self.store.get_all(T::collection())
    }

    pub fn get_count(&self) -> Result<usize> {
        self.store.count(T::collection())
    }

    /// Remove a record. Unknown ids are a no-op.
    pub fn delete_by_id(&self, id: &str) -> Result<()> {
        self.store.delete_by_id(T::collection(), id)
    }

    /// Shallow-merge the supplied patch fields over the stored record
    ///
    /// Returns the merged record, or `None` when nothing is stored at `id`.
    pub fn update_by_id(&self, id: &str, patch: &T::Patch) -> Result<Option<T>> {
        self.store.merge_by_id(T::collection(), id, patch)
    }

    /// Like `update_by_id` but a missing record is an error
    pub fn update_existing(&self, id: &str, patch: &T::Patch) -> Result<T> {
        self.update_by_id(id, patch)?
            .ok_or_else(|| EntityError::not_found(T::collection(), id).into())
    }

    pub(crate) fn generate_id(&self) -> String {
        self.store.generate_id()
    }
}
