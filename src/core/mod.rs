//! Core module containing fundamental traits and types

pub mod entity;
pub mod error;
pub mod field;
pub mod service;
pub mod store;
pub mod validation;

pub use entity::Entity;
pub use error::{BillbookError, ConfigError, EntityError, Result, StoreError, ValidationError};
pub use field::{FieldFormat, FieldValue};
pub use service::{
    ClientLookup, Clock, IdGenerator, KeyValueStore, ProductLookup, SystemClock, UuidGenerator,
};
pub use store::ObjectStore;
pub use validation::Validate;
