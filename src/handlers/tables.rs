use axum::{Json, extract::Path, extract::State};
use serde_json::Value;
use tracing::info;

use crate::db::{ResultSet, connection, executor, introspect};
use crate::error::DashError;
use crate::router::DashState;

/// Table list for the View Tables selector.
pub async fn list_tables(State(state): State<DashState>) -> Result<Json<Vec<String>>, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    let tables = introspect::list_tables(&mut conn).await?;
    Ok(Json(tables))
}

/// Full contents of one table. The name is resolved against the live schema
/// before it is interpolated.
pub async fn table_rows(
    State(state): State<DashState>,
    Path(table): Path<String>,
) -> Result<Json<ResultSet>, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    let table = introspect::require_table(&mut conn, &table).await?;
    let rs = executor::run_query(&mut conn, &format!("SELECT * FROM `{table}`"), &[]).await?;
    info!(table = %table, rows = rs.rows.len(), "table viewed");
    Ok(Json(rs))
}

/// Live value list for a select control, e.g. every `Customer_ID` in
/// `Customers`. Both identifiers are validated before interpolation.
pub async fn lookup(
    State(state): State<DashState>,
    Path((table, column)): Path<(String, String)>,
) -> Result<Json<Vec<Value>>, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    let table = introspect::require_table(&mut conn, &table).await?;
    let column = introspect::require_column(&mut conn, &table, &column).await?;
    let rs = executor::run_query(
        &mut conn,
        &format!("SELECT `{column}` FROM `{table}`"),
        &[],
    )
    .await?;
    let values = rs
        .rows
        .into_iter()
        .filter_map(|mut row| (!row.is_empty()).then(|| row.swap_remove(0)))
        .collect();
    Ok(Json(values))
}
