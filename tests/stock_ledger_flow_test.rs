mod common;

use common::{at, create_variation, seed_fixtures, setup_db, setup_services};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use stockledger_api::{
    entities::{inventory_level, stock_in, stock_in_item, stock_out_item},
    errors::ServiceError,
    services::catalog::NewVariation,
    services::stock_in::{NewStockIn, StockInLine},
    services::stock_out::{NewStockOut, StockOutLine},
    services::BatchFailurePolicy,
};

#[tokio::test]
async fn end_to_end_stock_flow() {
    let db = setup_db("end_to_end_stock_flow").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    // Fresh variation starts at zero.
    let row = services.inventory.get(variation_id).await.unwrap();
    assert_eq!(row.stock_quantity, 0);
    assert_eq!(row.product_name, "Sunscreen");
    assert_eq!(row.sku, "SUN-30ML-0001");

    // Stock in 5 units.
    services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-100001".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![StockInLine {
                variation_id,
                quantity: 5,
            }],
        )
        .await
        .unwrap();

    let row = services.inventory.get(variation_id).await.unwrap();
    assert_eq!(row.stock_quantity, 5);
    assert_eq!(row.last_updated_date, at(9, 0));

    // Stock out 2 damaged units.
    let recorded_out = services
        .stock_out
        .record(
            NewStockOut {
                order_transaction_id: None,
                stock_out_date: Some(at(14, 30)),
            },
            vec![StockOutLine {
                variation_id,
                quantity: 2,
                reason: "damaged".to_string(),
            }],
        )
        .await
        .unwrap();
    assert!(recorded_out.reference_number.starts_with("ADJ-20240510-"));

    let row = services.inventory.get(variation_id).await.unwrap();
    assert_eq!(row.stock_quantity, 3);

    // Reconstructed history: +5 then -2, oldest first.
    let history = services.history.history_for(variation_id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].quantity, 5);
    assert_eq!(history[0].reference_number, "REF-100001");
    assert_eq!(history[0].reason, None);
    assert_eq!(history[0].employee_name.as_deref(), Some("Maria Santos"));
    assert_eq!(history[1].quantity, -2);
    assert_eq!(history[1].reason.as_deref(), Some("damaged"));
    assert_eq!(history[1].employee_name, None);
}

#[tokio::test]
async fn history_merge_orders_by_timestamp() {
    let db = setup_db("history_merge_orders_by_timestamp").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-200001".to_string(),
                stock_in_date: at(8, 0),
            },
            vec![StockInLine {
                variation_id,
                quantity: 10,
            }],
        )
        .await
        .unwrap();

    services
        .stock_out
        .record(
            NewStockOut {
                order_transaction_id: None,
                stock_out_date: Some(at(11, 0)),
            },
            vec![StockOutLine {
                variation_id,
                quantity: 3,
                reason: "sold".to_string(),
            }],
        )
        .await
        .unwrap();

    let per_variation = services.history.history_for(variation_id).await.unwrap();
    let signed: Vec<i32> = per_variation.iter().map(|e| e.quantity).collect();
    assert_eq!(signed, vec![10, -3]);

    // Global feed is newest first and always carries the employee slot.
    let global = services.history.history_all().await.unwrap();
    let signed: Vec<i32> = global.iter().map(|e| e.quantity).collect();
    assert_eq!(signed, vec![-3, 10]);
}

#[tokio::test]
async fn failing_line_item_aborts_whole_batch() {
    let db = setup_db("failing_line_item_aborts_whole_batch").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    let unknown_variation = variation_id + 999;
    let err = services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-300001".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![
                StockInLine {
                    variation_id,
                    quantity: 4,
                },
                StockInLine {
                    variation_id: unknown_variation,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // Nothing from the batch survives: no header, no items, no delta.
    let headers = stock_in::Entity::find().count(db.as_ref()).await.unwrap();
    assert_eq!(headers, 0);
    let items = stock_in_item::Entity::find().count(db.as_ref()).await.unwrap();
    assert_eq!(items, 0);
    let row = services.inventory.get(variation_id).await.unwrap();
    assert_eq!(row.stock_quantity, 0);
}

#[tokio::test]
async fn unknown_supplier_or_employee_is_rejected() {
    let db = setup_db("unknown_supplier_or_employee_is_rejected").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    let err = services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id + 999,
                reference_number: "REF-350001".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![StockInLine {
                variation_id,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id + 999,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-350002".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![StockInLine {
                variation_id,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let headers = stock_in::Entity::find().count(db.as_ref()).await.unwrap();
    assert_eq!(headers, 0);
    let row = services.inventory.get(variation_id).await.unwrap();
    assert_eq!(row.stock_quantity, 0);
}

#[tokio::test]
async fn duplicate_reference_number_is_rejected() {
    let db = setup_db("duplicate_reference_number_is_rejected").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    let batch = NewStockIn {
        employee_id: fixtures.employee_id,
        supplier_id: fixtures.supplier_id,
        reference_number: "REF-400001".to_string(),
        stock_in_date: at(9, 0),
    };

    services
        .stock_in
        .record(
            batch.clone(),
            vec![StockInLine {
                variation_id,
                quantity: 2,
            }],
        )
        .await
        .unwrap();

    let err = services
        .stock_in
        .record(
            batch,
            vec![StockInLine {
                variation_id,
                quantity: 7,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateReference(_)));

    // Only the first batch took effect.
    let row = services.inventory.get(variation_id).await.unwrap();
    assert_eq!(row.stock_quantity, 2);
}

#[tokio::test]
async fn validation_rejects_before_any_persistence() {
    let db = setup_db("validation_rejects_before_any_persistence").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    let base = NewStockIn {
        employee_id: fixtures.employee_id,
        supplier_id: fixtures.supplier_id,
        reference_number: "REF-500001".to_string(),
        stock_in_date: at(9, 0),
    };

    // Empty line-item list.
    let err = services.stock_in.record(base.clone(), vec![]).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    // Non-positive quantity.
    let err = services
        .stock_in
        .record(
            base.clone(),
            vec![StockInLine {
                variation_id,
                quantity: 0,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    // Malformed reference number.
    let mut bad_ref = base;
    bad_ref.reference_number = "REF-12".to_string();
    let err = services
        .stock_in
        .record(
            bad_ref,
            vec![StockInLine {
                variation_id,
                quantity: 1,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    // Stock-out without a reason.
    let err = services
        .stock_out
        .record(
            NewStockOut::default(),
            vec![StockOutLine {
                variation_id,
                quantity: 1,
                reason: "  ".to_string(),
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    let headers = stock_in::Entity::find().count(db.as_ref()).await.unwrap();
    assert_eq!(headers, 0);
}

#[tokio::test]
async fn projection_matches_ledger_after_mixed_batches() {
    let db = setup_db("projection_matches_ledger_after_mixed_batches").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    // One batch with repeated lines for the same variation applies
    // cumulatively.
    services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-600001".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![
                StockInLine {
                    variation_id,
                    quantity: 3,
                },
                StockInLine {
                    variation_id,
                    quantity: 4,
                },
            ],
        )
        .await
        .unwrap();

    services
        .stock_out
        .record(
            NewStockOut {
                order_transaction_id: None,
                stock_out_date: Some(at(15, 0)),
            },
            vec![
                StockOutLine {
                    variation_id,
                    quantity: 2,
                    reason: "sold".to_string(),
                },
                StockOutLine {
                    variation_id,
                    quantity: 1,
                    reason: "damaged".to_string(),
                },
            ],
        )
        .await
        .unwrap();

    // Recompute independently from the ledger tables.
    let in_sum: i64 = stock_in_item::Entity::find()
        .filter(stock_in_item::Column::VariationId.eq(variation_id))
        .all(db.as_ref())
        .await
        .unwrap()
        .iter()
        .map(|i| i.quantity as i64)
        .sum();
    let out_sum: i64 = stock_out_item::Entity::find()
        .filter(stock_out_item::Column::VariationId.eq(variation_id))
        .all(db.as_ref())
        .await
        .unwrap()
        .iter()
        .map(|i| i.quantity as i64)
        .sum();

    let level = inventory_level::Entity::find_by_id(variation_id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(level.stock_quantity as i64, in_sum - out_sum);
    assert_eq!(level.stock_quantity, 4);
}

#[tokio::test]
async fn adjustment_batches_get_distinct_references() {
    let db = setup_db("adjustment_batches_get_distinct_references").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-700001".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![StockInLine {
                variation_id,
                quantity: 10,
            }],
        )
        .await
        .unwrap();

    let first = services
        .stock_out
        .record(
            NewStockOut::default(),
            vec![StockOutLine {
                variation_id,
                quantity: 1,
                reason: "damaged".to_string(),
            }],
        )
        .await
        .unwrap();
    let second = services
        .stock_out
        .record(
            NewStockOut::default(),
            vec![StockOutLine {
                variation_id,
                quantity: 1,
                reason: "damaged".to_string(),
            }],
        )
        .await
        .unwrap();

    assert!(first.reference_number.starts_with("ADJ-"));
    assert!(second.reference_number.starts_with("ADJ-"));
    assert_ne!(first.reference_number, second.reference_number);
}

#[tokio::test]
async fn order_reference_is_copied_from_order_id() {
    let db = setup_db("order_reference_is_copied_from_order_id").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;
    let variation_id = create_variation(&services, fixtures.product_id).await;

    services
        .stock_in
        .record(
            NewStockIn {
                employee_id: fixtures.employee_id,
                supplier_id: fixtures.supplier_id,
                reference_number: "REF-800001".to_string(),
                stock_in_date: at(9, 0),
            },
            vec![StockInLine {
                variation_id,
                quantity: 5,
            }],
        )
        .await
        .unwrap();

    let order_id = uuid::Uuid::new_v4();
    let recorded = services
        .stock_out
        .record(
            NewStockOut {
                order_transaction_id: Some(order_id),
                stock_out_date: Some(at(12, 0)),
            },
            vec![StockOutLine {
                variation_id,
                quantity: 2,
                reason: "sold".to_string(),
            }],
        )
        .await
        .unwrap();

    assert_eq!(recorded.reference_number, order_id.to_string());
}

#[tokio::test]
async fn best_effort_variation_batch_skips_failures() {
    let db = setup_db("best_effort_variation_batch_skips_failures").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;

    // The middle item collides with the first one's explicit SKU and gets
    // skipped; its neighbors still commit.
    let specs = vec![
        NewVariation {
            variation_type: Some("Size".to_string()),
            variation_value: Some("30mL".to_string()),
            sku: Some("SUN-FIXED-001".to_string()),
            unit_price: dec!(12.50),
        },
        NewVariation {
            variation_type: Some("Size".to_string()),
            variation_value: Some("50mL".to_string()),
            sku: Some("SUN-FIXED-001".to_string()),
            unit_price: dec!(18.00),
        },
        NewVariation {
            variation_type: Some("Size".to_string()),
            variation_value: Some("60mL".to_string()),
            sku: None,
            unit_price: dec!(21.00),
        },
    ];

    let created = services
        .catalog
        .create_variations(fixtures.product_id, specs, BatchFailurePolicy::BestEffort)
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].sku, "SUN-FIXED-001");
    assert_eq!(created[1].sku, "SUN-60ML-0003");

    // Every surviving variation has a zero-quantity projection row.
    for variation in &created {
        let row = services.inventory.get(variation.variation_id).await.unwrap();
        assert_eq!(row.stock_quantity, 0);
    }
}

#[tokio::test]
async fn all_or_nothing_variation_batch_aborts_on_failure() {
    let db = setup_db("all_or_nothing_variation_batch_aborts_on_failure").await;
    let services = setup_services(db.clone()).await;
    let fixtures = seed_fixtures(db.as_ref()).await;

    let specs = vec![
        NewVariation {
            variation_type: Some("Size".to_string()),
            variation_value: Some("30mL".to_string()),
            sku: Some("SUN-FIXED-002".to_string()),
            unit_price: dec!(12.50),
        },
        NewVariation {
            variation_type: Some("Size".to_string()),
            variation_value: Some("50mL".to_string()),
            sku: Some("SUN-FIXED-002".to_string()),
            unit_price: dec!(18.00),
        },
    ];

    let err = services
        .catalog
        .create_variations(fixtures.product_id, specs, BatchFailurePolicy::AllOrNothing)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateSku(_)));

    let (rows, total) = services.inventory.list(1, 20).await.unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}
