//! LMDB key-value substrate using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded store, no external server required. All operations
//! are synchronous memory-mapped I/O, which matches the synchronous object
//! store directly.
//!
//! # Databases (named LMDB sub-databases)
//!
//! - `records` — `"<Collection>:<id>"` → JSON string
//!
//! Keys iterate in byte order, so `keys_with_prefix` is a range scan instead
//! of a full enumeration.
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::KeyValueStore;
use crate::core::error::{Result, StoreError};
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

const BACKEND: &str = "lmdb";

fn lmdb_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::backend(BACKEND, e)
}

/// LMDB-backed implementation of `KeyValueStore`.
///
/// The `Env` is wrapped in an `Arc` for cheap cloning.
///
/// # Example
///
/// ```rust,ignore
/// use billbook::storage::LmdbKeyValueStore;
///
/// let substrate = LmdbKeyValueStore::open("/tmp/billbook-lmdb")?;
/// substrate.put("Client:1", "{}")?;
/// ```
#[derive(Clone)]
pub struct LmdbKeyValueStore {
    env: Arc<Env>,
    db: Database<Str, Str>,
}

impl LmdbKeyValueStore {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `records` named database.
    ///
    /// The map size defaults to 256 MB. LMDB only reserves that much virtual
    /// address space, it does not allocate it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_map_size(path, 256 * 1024 * 1024)
    }

    /// Open with an explicit map size in bytes
    pub fn open_with_map_size(path: impl AsRef<Path>, map_size: usize) -> Result<Self> {
        std::fs::create_dir_all(path.as_ref()).map_err(lmdb_error)?;

        // SAFETY: the environment is opened once per path by this process and
        // never mapped with conflicting flags.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(4)
                .max_readers(126)
                .open(path.as_ref())
                .map_err(lmdb_error)?
        };

        let mut wtxn = env.write_txn().map_err(lmdb_error)?;
        let db: Database<Str, Str> = env
            .create_database(&mut wtxn, Some("records"))
            .map_err(lmdb_error)?;
        wtxn.commit().map_err(lmdb_error)?;

        tracing::info!(path = %path.as_ref().display(), "opened lmdb substrate");

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

impl KeyValueStore for LmdbKeyValueStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn().map_err(lmdb_error)?;
        self.db.put(&mut wtxn, key, value).map_err(lmdb_error)?;
        wtxn.commit().map_err(lmdb_error)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let rtxn = self.env.read_txn().map_err(lmdb_error)?;
        let value = self.db.get(&rtxn, key).map_err(lmdb_error)?;
        Ok(value.map(str::to_string))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn().map_err(lmdb_error)?;
        self.db.delete(&mut wtxn, key).map_err(lmdb_error)?;
        wtxn.commit().map_err(lmdb_error)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let rtxn = self.env.read_txn().map_err(lmdb_error)?;
        let mut keys = Vec::new();
        for item in self.db.iter(&rtxn).map_err(lmdb_error)? {
            let (key, _value) = item.map_err(lmdb_error)?;
            keys.push(key.to_string());
        }
        Ok(keys)
    }

    fn clear(&self) -> Result<()> {
        let mut wtxn = self.env.write_txn().map_err(lmdb_error)?;
        self.db.clear(&mut wtxn).map_err(lmdb_error)?;
        wtxn.commit().map_err(lmdb_error)?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let rtxn = self.env.read_txn().map_err(lmdb_error)?;
        let mut keys = Vec::new();
        for item in self.db.prefix_iter(&rtxn, prefix).map_err(lmdb_error)? {
            let (key, _value) = item.map_err(lmdb_error)?;
            keys.push(key.to_string());
        }
        Ok(keys)
    }
}
