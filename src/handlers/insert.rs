use axum::{Json, extract::Path, extract::State};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::db::{SqlValue, connection, executor, introspect};
use crate::error::DashError;
use crate::forms;
use crate::router::DashState;

#[derive(Serialize)]
pub struct InsertOutcome {
    pub table: String,
    pub inserted: u64,
}

/// Form spec for the Insert Data page: the table's columns minus the
/// database-assigned ones, each tagged with its type bucket.
pub async fn insert_form(
    State(state): State<DashState>,
    Path(table): Path<String>,
) -> Result<Json<forms::FormSpec>, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    let table = introspect::require_table(&mut conn, &table).await?;
    let columns = introspect::list_columns(&mut conn, &table).await?;
    Ok(Json(forms::build_form(&table, &columns)))
}

/// Insert one row. The form spec is rebuilt from the live schema on every
/// call, so the posted object is coerced against the current columns, and a
/// constraint failure comes back as a banner rather than ending the session.
pub async fn insert_row(
    State(state): State<DashState>,
    Path(table): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<InsertOutcome>, DashError> {
    let mut conn = connection::open(&state.connect).await?;
    let table = introspect::require_table(&mut conn, &table).await?;
    let columns = introspect::list_columns(&mut conn, &table).await?;
    let spec = forms::build_form(&table, &columns);

    let values = forms::collect_values(&spec, &payload)?;
    let names: Vec<String> = values.iter().map(|(n, _)| n.clone()).collect();
    let params: Vec<SqlValue> = values.into_iter().map(|(_, v)| v).collect();

    let sql = executor::insert_statement(&table, &names);
    let inserted = executor::run_statement(&mut conn, &sql, &params).await?;
    info!(table = %table, "row inserted");
    Ok(Json(InsertOutcome { table, inserted }))
}
