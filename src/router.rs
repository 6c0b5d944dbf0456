use axum::{
    Router,
    routing::{get, post},
};
use sqlx::mysql::MySqlConnectOptions;

use crate::handlers::{analytics, insert, inventory, orders, query, tables};
use crate::web;

/// Shared state is just the connection recipe: handlers open and drop their
/// own connections, so there is no mutable in-process state to coordinate.
#[derive(Clone)]
pub struct DashState {
    pub connect: MySqlConnectOptions,
}

impl DashState {
    pub fn new(connect: MySqlConnectOptions) -> Self {
        Self { connect }
    }
}

pub fn dash_router(state: DashState) -> Router {
    Router::new()
        .route("/", get(web::index))
        .route("/api/tables", get(tables::list_tables))
        .route("/api/tables/{table}/rows", get(tables::table_rows).post(insert::insert_row))
        .route("/api/tables/{table}/form", get(insert::insert_form))
        .route("/api/lookup/{table}/{column}", get(tables::lookup))
        .route("/api/orders", post(orders::place_order))
        .route("/api/orders/{order_id}/cancel", post(orders::cancel_order))
        .route("/api/restock", post(inventory::restock))
        .route("/api/functions/sales/{cake_id}", get(inventory::cake_sales))
        .route("/api/functions/stock/{cake_id}", get(inventory::stock_status))
        .route("/api/analytics", get(analytics::analytics))
        .route("/api/query", post(query::custom_query))
        .with_state(state)
}
