//! Macro-generated test suite for `KeyValueStore` contract validation.
//!
//! # Generated Tests
//!
//! - `test_put_and_get` — value written is read back verbatim
//! - `test_get_missing` — unknown key reads as `None`
//! - `test_put_overwrites` — last write wins
//! - `test_delete_existing` / `test_delete_missing` — removal, no-op on unknown keys
//! - `test_keys_lists_everything` — enumeration covers every key
//! - `test_keys_with_prefix` — prefix scan does not leak neighbouring collections
//! - `test_clear` — wipes every key
//! - `test_shared_across_threads` — concurrent writers through an `Arc`

/// Generate a `KeyValueStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty substrate implementing
/// `KeyValueStore + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! key_value_store_tests {
    ($factory:expr) => {
        mod key_value_store_contract_tests {
            use super::*;
            use billbook::core::KeyValueStore;
            use std::sync::Arc;

            fn sorted(mut keys: Vec<String>) -> Vec<String> {
                keys.sort();
                keys
            }

            #[test]
            fn test_put_and_get() {
                let store = $factory;
                store.put("Client:1", r#"{"id":"1","name":"Acme"}"#).unwrap();

                assert_eq!(
                    store.get("Client:1").unwrap().as_deref(),
                    Some(r#"{"id":"1","name":"Acme"}"#)
                );
            }

            #[test]
            fn test_get_missing() {
                let store = $factory;
                assert!(store.get("Client:nope").unwrap().is_none());
            }

            #[test]
            fn test_put_overwrites() {
                let store = $factory;
                store.put("Product:1", "first").unwrap();
                store.put("Product:1", "second").unwrap();

                assert_eq!(store.get("Product:1").unwrap().as_deref(), Some("second"));
                assert_eq!(store.keys().unwrap().len(), 1);
            }

            #[test]
            fn test_delete_existing() {
                let store = $factory;
                store.put("Invoice:1", "{}").unwrap();
                store.delete("Invoice:1").unwrap();

                assert!(store.get("Invoice:1").unwrap().is_none());
            }

            #[test]
            fn test_delete_missing() {
                let store = $factory;
                store.delete("Invoice:missing").unwrap();
                assert!(store.keys().unwrap().is_empty());
            }

            #[test]
            fn test_keys_lists_everything() {
                let store = $factory;
                for key in ["Client:b", "Product:a", "Client:a"] {
                    store.put(key, "{}").unwrap();
                }

                assert_eq!(
                    sorted(store.keys().unwrap()),
                    vec!["Client:a", "Client:b", "Product:a"]
                );
            }

            #[test]
            fn test_keys_with_prefix() {
                let store = $factory;
                for key in ["Client:1", "Client:2", "ClientArchive:1", "Invoice:1"] {
                    store.put(key, "{}").unwrap();
                }

                assert_eq!(
                    sorted(store.keys_with_prefix("Client:").unwrap()),
                    vec!["Client:1", "Client:2"]
                );
                assert!(store.keys_with_prefix("Company:").unwrap().is_empty());
            }

            #[test]
            fn test_clear() {
                let store = $factory;
                store.put("Client:1", "{}").unwrap();
                store.put("Invoice:1", "{}").unwrap();
                store.clear().unwrap();

                assert!(store.keys().unwrap().is_empty());
                assert!(store.get("Client:1").unwrap().is_none());
            }

            #[test]
            fn test_shared_across_threads() {
                let store: Arc<dyn KeyValueStore> = Arc::new($factory);

                let handles: Vec<_> = (0..4)
                    .map(|i| {
                        let store = Arc::clone(&store);
                        std::thread::spawn(move || {
                            store.put(&format!("Client:{}", i), "{}").unwrap();
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }

                assert_eq!(store.keys_with_prefix("Client:").unwrap().len(), 4);
            }
        }
    };
}
