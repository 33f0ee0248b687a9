//! Service traits: the key-value substrate and the collaborator capabilities
//! the core consumes (lookups, identifiers, time)

use crate::core::error::Result;
use crate::entities::{Client, Product};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Raw durable storage: key → opaque string value
///
/// Implementations know nothing about collections or schemas. Writes must be
/// visible to subsequent reads in the same process; durability across restarts
/// is whatever the backend provides. No atomicity across keys.
pub trait KeyValueStore: Send + Sync {
    /// Short backend name used in logs and errors
    fn backend_name(&self) -> &'static str;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`. Removing an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<()>;

    /// Every key currently stored, in backend enumeration order
    fn keys(&self) -> Result<Vec<String>>;

    /// Remove every key
    fn clear(&self) -> Result<()>;

    /// Keys starting with `prefix`
    ///
    /// Backends with ordered keys can override this with a range scan.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect())
    }
}

/// Source of fresh unique identifiers
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Current-time source
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Resolve a product by id (tax-rate resolution during computation)
pub trait ProductLookup {
    fn product(&self, id: &str) -> Option<Product>;

    /// Tax percentage of a product, 0 when the product cannot be resolved
    fn tax_percent(&self, id: &str) -> f64 {
        self.product(id).map(|p| p.tax_percent).unwrap_or(0.0)
    }
}

/// Resolve a client by id (name resolution for search, sort and projection)
pub trait ClientLookup {
    fn client(&self, id: &str) -> Option<Client>;

    fn client_name(&self, id: &str) -> Option<String> {
        self.client(id).map(|c| c.name)
    }
}

impl ProductLookup for [Product] {
    fn product(&self, id: &str) -> Option<Product> {
        self.iter().find(|p| p.id == id).cloned()
    }
}

impl ProductLookup for Vec<Product> {
    fn product(&self, id: &str) -> Option<Product> {
        self.as_slice().product(id)
    }
}

impl ClientLookup for [Client] {
    fn client(&self, id: &str) -> Option<Client> {
        self.iter().find(|c| c.id == id).cloned()
    }
}

impl ClientLookup for Vec<Client> {
    fn client(&self, id: &str) -> Option<Client> {
        self.as_slice().client(id)
    }
}
