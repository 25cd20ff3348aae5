//! Stock Ledger API Library
//!
//! Core of a storefront back-office: an append-only stock movement ledger
//! with a derived per-variation inventory projection, SKU and reference
//! number generation, and a merged movement history.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod reference;
pub mod services;
pub mod sku;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// All versioned API routes, nested under `/api/v1` by the binary.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/stock-ins", handlers::stock_in::stock_in_router())
        .nest("/stock-outs", handlers::stock_out::stock_out_router())
        .nest("/inventory", handlers::inventory::inventory_router())
        .nest("/stock-history", handlers::history::history_router())
        .nest("/variations", handlers::variations::variations_router())
}

/// Liveness plus a storage ping.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match db::ping(state.db.as_ref()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "up" })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": "down" })),
        ),
    }
}
