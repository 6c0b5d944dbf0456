use axum::{Json, extract::Path, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::db::{SqlValue, connection, executor};
use crate::error::DashError;
use crate::router::DashState;

#[derive(Deserialize)]
pub struct RestockRequest {
    pub cake_id: i64,
    pub quantity: i64,
}

#[derive(Serialize)]
pub struct RestockOutcome {
    pub message: &'static str,
}

/// `CALL Restock_Cake(?,?)`. Failures render as banners like every other
/// write action; the procedure owns the stock arithmetic.
pub async fn restock(
    State(state): State<DashState>,
    Json(req): Json<RestockRequest>,
) -> Result<Json<RestockOutcome>, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    executor::run_statement(
        &mut conn,
        "CALL Restock_Cake(?, ?)",
        &[SqlValue::Int(req.cake_id), SqlValue::Int(req.quantity)],
    )
    .await?;
    info!(cake_id = req.cake_id, quantity = req.quantity, "cake restocked");
    Ok(Json(RestockOutcome {
        message: "Stock updated",
    }))
}

#[derive(Serialize)]
pub struct ScalarOutcome {
    pub cake_id: i64,
    pub label: &'static str,
    pub value: Value,
}

/// `SELECT GetCakeSales(?) AS TotalSales`, first row's scalar.
pub async fn cake_sales(
    State(state): State<DashState>,
    Path(cake_id): Path<i64>,
) -> Result<Json<ScalarOutcome>, DashError> {
    let value = scalar(
        &state,
        "SELECT GetCakeSales(?) AS TotalSales",
        "GetCakeSales",
        cake_id,
    )
    .await?;
    Ok(Json(ScalarOutcome {
        cake_id,
        label: "TotalSales",
        value,
    }))
}

/// `SELECT CheckStock(?) AS StockStatus`, first row's scalar.
pub async fn stock_status(
    State(state): State<DashState>,
    Path(cake_id): Path<i64>,
) -> Result<Json<ScalarOutcome>, DashError> {
    let value = scalar(
        &state,
        "SELECT CheckStock(?) AS StockStatus",
        "CheckStock",
        cake_id,
    )
    .await?;
    Ok(Json(ScalarOutcome {
        cake_id,
        label: "StockStatus",
        value,
    }))
}

async fn scalar(
    state: &DashState,
    sql: &str,
    function: &str,
    cake_id: i64,
) -> Result<Value, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    let rs = executor::run_query(&mut conn, sql, &[SqlValue::Int(cake_id)]).await?;
    rs.rows
        .into_iter()
        .next()
        .and_then(|mut row| (!row.is_empty()).then(|| row.swap_remove(0)))
        .ok_or_else(|| DashError::EmptyScalar(function.to_string()))
}
