use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::info;

use crate::db::{ResultSet, connection, executor, guard};
use crate::error::DashError;
use crate::router::DashState;

#[derive(Deserialize)]
pub struct CustomQueryRequest {
    pub sql: String,
}

/// Run Custom Query: the guard runs before any connection is opened, so a
/// rejected statement never reaches the database.
pub async fn custom_query(
    State(state): State<DashState>,
    Json(req): Json<CustomQueryRequest>,
) -> Result<Json<ResultSet>, DashError> {
    let sql = guard::ensure_read_only(&req.sql)?;
    let mut conn = connection::open(&state.connect).await?;
    let rs = executor::run_query(&mut conn, sql, &[]).await?;
    info!(rows = rs.rows.len(), "custom query executed");
    Ok(Json(rs))
}
