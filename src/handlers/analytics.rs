use axum::{Json, extract::State};
use serde::Serialize;
use sqlx::Row;
use sqlx::mysql::MySqlConnection;

use crate::db::connection;
use crate::error::DashError;
use crate::router::DashState;

#[derive(Serialize)]
pub struct BestSeller {
    pub name: String,
    pub sold: i64,
}

#[derive(Serialize)]
pub struct Analytics {
    pub total_orders: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub best_sellers: Vec<BestSeller>,
}

/// Three order-count metrics plus the best-sellers aggregate for the bar
/// chart. Only completed orders count toward the chart.
pub async fn analytics(State(state): State<DashState>) -> Result<Json<Analytics>, DashError> {
    let mut conn = connection::open(&state.connect).await?;

    let total_orders = count(&mut conn, "SELECT COUNT(*) FROM Order_Table").await?;
    let completed = count(
        &mut conn,
        "SELECT COUNT(*) FROM Order_Table WHERE StatusOrder='Completed'",
    )
    .await?;
    let cancelled = count(
        &mut conn,
        "SELECT COUNT(*) FROM Order_Table WHERE StatusOrder='Cancelled'",
    )
    .await?;

    let rows = sqlx::query(
        r#"
        SELECT C.C_Name, COUNT(*) AS Sold
        FROM Order_Table O
        JOIN Cake_Catalogue C ON O.Cake_ID = C.Cake_ID
        WHERE StatusOrder = 'Completed'
        GROUP BY O.Cake_ID, C.C_Name
        ORDER BY Sold DESC
        "#,
    )
    .fetch_all(&mut conn)
    .await
    .map_err(DashError::Query)?;

    let best_sellers = rows
        .into_iter()
        .map(|row| {
            let name: String = row.try_get(0).map_err(DashError::Query)?;
            let sold: i64 = row.try_get(1).map_err(DashError::Query)?;
            Ok(BestSeller { name, sold })
        })
        .collect::<Result<_, DashError>>()?;

    Ok(Json(Analytics {
        total_orders,
        completed,
        cancelled,
        best_sellers,
    }))
}

async fn count(conn: &mut MySqlConnection, sql: &str) -> Result<i64, DashError> {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(conn)
        .await
        .map_err(DashError::Query)
}
