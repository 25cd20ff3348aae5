#![allow(dead_code)]

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use stockledger_api::{
    db::{self, DbPool},
    entities::{employee, product, supplier},
    events::{process_events, EventSender},
    handlers::AppServices,
    services::catalog::NewVariation,
    services::BatchFailurePolicy,
};
use tokio::sync::mpsc;

/// Connects to a named shared in-memory SQLite database and applies
/// migrations. The name keeps concurrently running tests isolated from each
/// other while letting every pooled connection see the same data.
pub async fn setup_db(name: &str) -> Arc<DbPool> {
    let url = format!("sqlite:file:{}?mode=memory&cache=shared", name);
    let pool = db::establish_connection(&url)
        .await
        .expect("failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    Arc::new(pool)
}

/// Builds the full service container with a drained event channel.
pub async fn setup_services(db_pool: Arc<DbPool>) -> AppServices {
    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(process_events(rx));
    AppServices::new(db_pool, Arc::new(EventSender::new(tx)))
        .await
        .expect("failed to build services")
}

pub struct Fixtures {
    pub product_id: i64,
    pub supplier_id: i64,
    pub employee_id: i64,
}

/// Seeds the collaborator-owned rows every ledger test needs.
pub async fn seed_fixtures(db: &DbPool) -> Fixtures {
    let product = product::ActiveModel {
        name: Set("Sunscreen".to_string()),
        status_id: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed product");

    let supplier = supplier::ActiveModel {
        name: Set("Glow Labs Distribution".to_string()),
        phone: Set(Some("555-0142".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed supplier");

    let employee = employee::ActiveModel {
        first_name: Set("Maria".to_string()),
        last_name: Set("Santos".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed employee");

    Fixtures {
        product_id: product.product_id,
        supplier_id: supplier.supplier_id,
        employee_id: employee.employee_id,
    }
}

/// Creates one 30mL variation for the fixture product and returns its id.
pub async fn create_variation(services: &AppServices, product_id: i64) -> i64 {
    let created = services
        .catalog
        .create_variations(
            product_id,
            vec![NewVariation {
                variation_type: Some("Size".to_string()),
                variation_value: Some("30mL".to_string()),
                sku: None,
                unit_price: dec!(12.50),
            }],
            BatchFailurePolicy::BestEffort,
        )
        .await
        .expect("failed to create variation");
    created[0].variation_id
}

/// A timestamp helper so movement ordering in tests is explicit.
pub fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    use chrono::TimeZone;
    Utc.with_ymd_and_hms(2024, 5, 10, hour, minute, 0).unwrap()
}
