//! Macro-generated repository contract suite, run over any substrate.
//!
//! # Generated Tests
//!
//! ## Records
//! - `test_round_trip_each_entity` — save then get returns an equal record
//! - `test_key_layout` — records land under `"<Collection>:<id>"`
//! - `test_get_all_and_count` — collections do not bleed into each other
//!
//! ## Updates
//! - `test_partial_update_touches_only_given_fields`
//! - `test_partial_update_keeps_unknown_fields`
//! - `test_clearing_optional_field`
//! - `test_update_missing_returns_none` / `test_update_existing_requires_record`
//! - `test_status_change_leaves_other_fields` — draft → paid
//! - `test_billing_update_rewrites_all_amounts`
//! - `test_update_keeps_record_id` — a patch never moves or renames a record
//!
//! ## Deletes & errors
//! - `test_delete_is_idempotent`
//! - `test_corrupt_record_is_an_error`
//!
//! ## Invoices & company
//! - `test_get_by_client_id_and_stats`
//! - `test_next_invoice_number_counts_same_day`
//! - `test_company_is_a_singleton`

/// Generate the repository contract suite.
///
/// `$factory` must evaluate to a fresh, empty substrate implementing
/// `KeyValueStore + 'static`.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use billbook::core::{BillbookError, EntityError, KeyValueStore, ObjectStore, StoreError};
            use billbook::entities::*;
            use chrono::NaiveDate;
            use std::sync::Arc;

            fn store() -> ObjectStore {
                let substrate: Arc<dyn KeyValueStore> = Arc::new($factory);
                sequential_store(substrate)
            }

            fn create_invoice(
                invoices: &InvoiceRepository,
                client_id: &str,
                number: &str,
                product: &Product,
                quantity: f64,
            ) -> Invoice {
                invoices
                    .create_with(
                        InvoiceInput::new(client_id, number, billing_for(product, quantity)),
                        &billbook::config::InvoiceSettings::default(),
                        &FixedClock(test_now()),
                    )
                    .unwrap()
            }

            // ==================================================================
            // Records
            // ==================================================================

            #[test]
            fn test_round_trip_each_entity() {
                let store = store();
                let clients = ClientRepository::new(store.clone());
                let products = ProductRepository::new(store.clone());
                let invoices = InvoiceRepository::new(store.clone());
                let company = CompanyRepository::new(store);

                let client = clients.create(sample_client_input("Acme")).unwrap();
                assert_eq!(clients.get_by_id(&client.id).unwrap(), Some(client.clone()));

                let product = products
                    .create(sample_product_input("Consulting", 100.0, 10.0))
                    .unwrap();
                assert_eq!(products.get_by_id(&product.id).unwrap(), Some(product.clone()));

                let invoice = create_invoice(&invoices, &client.id, "INV-1", &product, 2.0);
                assert_eq!(invoices.get_by_id(&invoice.id).unwrap(), Some(invoice.clone()));

                let stored = company.initialize(Some(sample_company())).unwrap();
                assert_eq!(company.get().unwrap(), Some(stored));
            }

            #[test]
            fn test_key_layout() {
                let store = store();
                let clients = ClientRepository::new(store.clone());
                let company = CompanyRepository::new(store.clone());

                let client = clients.create(sample_client_input("Acme")).unwrap();
                company.initialize(Some(sample_company())).unwrap();

                let mut keys = store.substrate().keys().unwrap();
                keys.sort();
                assert_eq!(keys, vec![format!("Client:{}", client.id), "Company:default".to_string()]);
            }

            #[test]
            fn test_get_all_and_count() {
                let store = store();
                let clients = ClientRepository::new(store.clone());
                let products = ProductRepository::new(store);

                for name in ["Acme", "Zeta", "Initech"] {
                    clients.create(sample_client_input(name)).unwrap();
                }
                products.create(sample_product_input("Hosting", 40.0, 0.0)).unwrap();

                let mut names: Vec<String> =
                    clients.get_all().unwrap().into_iter().map(|c| c.name).collect();
                names.sort();
                assert_eq!(names, vec!["Acme", "Initech", "Zeta"]);
                assert_eq!(clients.get_count().unwrap(), 3);
                assert_eq!(products.get_count().unwrap(), 1);
            }

            // ==================================================================
            // Updates
            // ==================================================================

            #[test]
            fn test_partial_update_touches_only_given_fields() {
                let clients = ClientRepository::new(store());
                let before = clients.create(sample_client_input("Acme")).unwrap();

                let patch = ClientPatch {
                    email: Some("billing@acme.example".to_string()),
                    ..Default::default()
                };
                let after = clients.update_by_id(&before.id, &patch).unwrap().unwrap();

                assert_eq!(after.email, "billing@acme.example");
                assert_eq!(
                    Client {
                        email: before.email.clone(),
                        ..after.clone()
                    },
                    before
                );
                assert_eq!(clients.get_by_id(&before.id).unwrap(), Some(after));
            }

            #[test]
            fn test_partial_update_keeps_unknown_fields() {
                let store = store();
                let products = ProductRepository::new(store.clone());
                store
                    .save(
                        "Product",
                        &serde_json::json!({
                            "id": "legacy",
                            "name": "Legacy",
                            "description": "",
                            "price": 5.0,
                            "taxPercent": 0.0,
                            "sku": "L-1"
                        }),
                        Some("legacy"),
                    )
                    .unwrap();

                let patch = ProductPatch {
                    price: Some(6.0),
                    ..Default::default()
                };
                products.update_by_id("legacy", &patch).unwrap().unwrap();

                let raw = store.substrate().get("Product:legacy").unwrap().unwrap();
                let raw: serde_json::Value = serde_json::from_str(&raw).unwrap();
                assert_eq!(raw["sku"], "L-1");
                assert_eq!(raw["price"], 6.0);
            }

            #[test]
            fn test_clearing_optional_field() {
                let clients = ClientRepository::new(store());
                let client = clients.create(sample_client_input("Acme")).unwrap();

                let patch = ClientPatch {
                    phone: Some(None),
                    ..Default::default()
                };
                let updated = clients.update_by_id(&client.id, &patch).unwrap().unwrap();

                assert!(updated.phone.is_none());
                assert_eq!(updated.contact_person, client.contact_person);
            }

            #[test]
            fn test_update_missing_returns_none() {
                let clients = ClientRepository::new(store());
                let patch = ClientPatch {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                };

                assert!(clients.update_by_id("missing", &patch).unwrap().is_none());
                assert_eq!(clients.get_count().unwrap(), 0);
            }

            #[test]
            fn test_update_existing_requires_record() {
                let clients = ClientRepository::new(store());
                let patch = ClientPatch::default();

                let err = clients.update_existing("missing", &patch).unwrap_err();
                assert!(matches!(
                    err,
                    BillbookError::Entity(EntityError::NotFound { ref id, .. }) if id == "missing"
                ));
                assert!(clients.require_by_id("missing").is_err());
            }

            #[test]
            fn test_status_change_leaves_other_fields() {
                let store = store();
                let products = ProductRepository::new(store.clone());
                let invoices = InvoiceRepository::new(store);

                let product = products
                    .create(sample_product_input("Consulting", 100.0, 10.0))
                    .unwrap();
                let draft = create_invoice(&invoices, "c1", "INV-1", &product, 1.0);
                assert_eq!(draft.status, InvoiceStatus::Draft);

                invoices.update_status_by_id(&draft.id, InvoiceStatus::Paid).unwrap();
                let paid = invoices.get_by_id(&draft.id).unwrap().unwrap();

                assert_eq!(paid.status, InvoiceStatus::Paid);
                assert_eq!(
                    Invoice {
                        status: InvoiceStatus::Draft,
                        ..paid
                    },
                    draft
                );
            }

            #[test]
            fn test_billing_update_rewrites_all_amounts() {
                let store = store();
                let products = ProductRepository::new(store.clone());
                let invoices = InvoiceRepository::new(store);

                let product = products
                    .create(sample_product_input("Consulting", 100.0, 10.0))
                    .unwrap();
                let invoice = create_invoice(&invoices, "c1", "INV-1", &product, 1.0);

                let updated = invoices
                    .update_billing_by_id(&invoice.id, billing_for(&product, 3.0))
                    .unwrap()
                    .unwrap();

                assert_eq!((updated.subtotal, updated.tax, updated.total), (300.0, 30.0, 330.0));
                assert_eq!(updated.items.len(), 1);
                assert_eq!(updated.items[0].quantity, 3.0);
                assert!(updated.amounts_consistent());
                assert_eq!(updated.invoice_number, invoice.invoice_number);
            }

            #[test]
            fn test_update_keeps_record_id() {
                let store = store();
                let products = ProductRepository::new(store.clone());
                let invoices = InvoiceRepository::new(store.clone());

                let product = products
                    .create(sample_product_input("Consulting", 100.0, 10.0))
                    .unwrap();
                let invoice = create_invoice(&invoices, "c1", "INV-1", &product, 2.0);

                let merged: Invoice = store
                    .merge_by_id("Invoice", &invoice.id, &serde_json::json!({"id": "other"}))
                    .unwrap()
                    .unwrap();
                assert_eq!(merged.id, invoice.id);

                let patch = InvoicePatch {
                    client_id: Some("c2".to_string()),
                    ..Default::default()
                };
                let updated = invoices.update_existing(&invoice.id, &patch).unwrap();

                assert_eq!(updated.id, invoice.id);
                assert_eq!(updated.client_id, "c2");
                assert_eq!((updated.subtotal, updated.tax, updated.total), (200.0, 20.0, 220.0));
                assert!(updated.amounts_consistent());
                assert!(invoices.get_by_id("other").unwrap().is_none());
                assert_eq!(invoices.get_count().unwrap(), 1);
            }

            // ==================================================================
            // Deletes & errors
            // ==================================================================

            #[test]
            fn test_delete_is_idempotent() {
                let clients = ClientRepository::new(store());
                let client = clients.create(sample_client_input("Acme")).unwrap();

                clients.delete_by_id(&client.id).unwrap();
                clients.delete_by_id(&client.id).unwrap();
                clients.delete_by_id("never-existed").unwrap();

                assert!(clients.get_by_id(&client.id).unwrap().is_none());
            }

            #[test]
            fn test_corrupt_record_is_an_error() {
                let store = store();
                store.substrate().put("Client:broken", "not json").unwrap();
                let clients = ClientRepository::new(store);

                assert!(matches!(
                    clients.get_by_id("broken"),
                    Err(BillbookError::Store(StoreError::Serialization { .. }))
                ));
                assert!(clients.get_all().is_err());
            }

            // ==================================================================
            // Invoices & company
            // ==================================================================

            #[test]
            fn test_get_by_client_id_and_stats() {
                let store = store();
                let products = ProductRepository::new(store.clone());
                let invoices = InvoiceRepository::new(store);
                let product = products
                    .create(sample_product_input("Consulting", 100.0, 0.0))
                    .unwrap();

                let first = create_invoice(&invoices, "acme", "INV-1", &product, 1.0);
                create_invoice(&invoices, "acme", "INV-2", &product, 3.0);
                create_invoice(&invoices, "zeta", "INV-3", &product, 5.0);
                invoices.update_status_by_id(&first.id, InvoiceStatus::Paid).unwrap();

                let mut numbers: Vec<String> = invoices
                    .get_by_client_id("acme")
                    .unwrap()
                    .into_iter()
                    .map(|i| i.invoice_number)
                    .collect();
                numbers.sort();
                assert_eq!(numbers, vec!["INV-1", "INV-2"]);
                assert!(invoices.get_by_client_id("nobody").unwrap().is_empty());

                let stats = invoices.client_stats("acme").unwrap();
                assert_eq!(stats.total_invoices, 2);
                assert_eq!(stats.total_amount, 400.0);
                assert_eq!(stats.paid_amount, 100.0);
                assert_eq!(stats.payment_rate, 50.0);
            }

            #[test]
            fn test_next_invoice_number_counts_same_day() {
                let store = store();
                let products = ProductRepository::new(store.clone());
                let invoices = InvoiceRepository::new(store);
                let product = products
                    .create(sample_product_input("Consulting", 100.0, 0.0))
                    .unwrap();
                let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

                assert_eq!(invoices.next_invoice_number(day, "INV").unwrap(), "INV-20240115-001");
                create_invoice(&invoices, "acme", "INV-20240115-001", &product, 1.0);
                assert_eq!(invoices.next_invoice_number(day, "INV").unwrap(), "INV-20240115-002");

                let other_day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
                assert_eq!(invoices.next_invoice_number(other_day, "BB").unwrap(), "BB-20240116-001");
            }

            #[test]
            fn test_company_is_a_singleton() {
                let store = store();
                let company = CompanyRepository::new(store.clone());
                assert!(!company.is_setup());
                assert!(matches!(
                    company.load(),
                    Err(BillbookError::Entity(EntityError::CompanyNotConfigured))
                ));

                let first = company.initialize(Some(sample_company())).unwrap();
                let second = CompanyRepository::new(store.clone()).initialize(None).unwrap();
                assert_eq!(first, second);

                let ignored = CompanyData {
                    name: "Someone Else".to_string(),
                    ..Default::default()
                };
                assert_eq!(company.initialize(Some(ignored)).unwrap(), first);
                assert!(company.is_setup());
                assert_eq!(store.count("Company").unwrap(), 1);
            }
        }
    };
}
