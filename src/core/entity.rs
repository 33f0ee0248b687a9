//! Entity trait defining the core abstraction for persisted records

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for every persisted record.
///
/// An entity knows the collection it lives in and its own identifier. The
/// substrate key of a record is `"<collection>:<id>"`.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name used as key prefix (e.g. "Client", "Invoice")
    fn collection() -> &'static str;

    /// Partial update accepted by `Repository::update_by_id`
    ///
    /// Only the fields a patch serializes are merged over the stored record,
    /// so fields missing from the patch type can never be rewritten through it.
    type Patch: Serialize + Send + Sync;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> &str;
}
