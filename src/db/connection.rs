use crate::error::DashError;
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};

/// Open a fresh connection for one logical operation.
///
/// There is deliberately no pool: each handler acquires a connection, runs
/// one query or statement group, and drops it. Dropping the connection on
/// any exit path, error paths included, is what releases it.
pub async fn open(opts: &MySqlConnectOptions) -> Result<MySqlConnection, DashError> {
    MySqlConnection::connect_with(opts)
        .await
        .map_err(DashError::Connection)
}
