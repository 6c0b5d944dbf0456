use crate::error::DashError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::{Value, json};
use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Executor, MySql, Row, Statement, TypeInfo};

/// A positional statement parameter. The three variants are the three type
/// buckets the dashboard knows about; everything binds, nothing is ever
/// interpolated into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Date(NaiveDate),
    Text(String),
}

impl SqlValue {
    fn bind_to<'q>(
        &'q self,
        query: Query<'q, MySql, MySqlArguments>,
    ) -> Query<'q, MySql, MySqlArguments> {
        match self {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        }
    }
}

/// One read's worth of rows, decoded into JSON cells. Produced here,
/// rendered once by the page, then discarded; never cached.
#[derive(Debug, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Execute a read-only statement and return all rows. Column names come
/// from the prepared statement's metadata, so an empty result still carries
/// its headers.
pub async fn run_query(
    conn: &mut MySqlConnection,
    sql: &str,
    params: &[SqlValue],
) -> Result<ResultSet, DashError> {
    let stmt = conn.prepare(sql).await.map_err(DashError::Query)?;
    let columns = stmt
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut query = stmt.query();
    for p in params {
        query = p.bind_to(query);
    }
    let rows = query
        .fetch_all(&mut *conn)
        .await
        .map_err(DashError::Query)?;
    let rows = rows.iter().map(row_to_cells).collect();
    Ok(ResultSet { columns, rows })
}

/// Execute a mutating statement or a procedure call with positional binds.
/// Returns rows affected; MySQL autocommits each statement.
pub async fn run_statement(
    conn: &mut MySqlConnection,
    sql: &str,
    params: &[SqlValue],
) -> Result<u64, DashError> {
    let mut query = sqlx::query(sql);
    for p in params {
        query = p.bind_to(query);
    }
    let result = query.execute(conn).await.map_err(DashError::Execution)?;
    Ok(result.rows_affected())
}

/// Build a parameterized INSERT for the given identifier set. Identifiers
/// must already be validated against the live schema; values always bind.
pub fn insert_statement(table: &str, columns: &[String]) -> String {
    let cols = columns
        .iter()
        .map(|c| format!("`{c}`"))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!("INSERT INTO `{table}` ({cols}) VALUES ({placeholders})")
}

fn row_to_cells(row: &MySqlRow) -> Vec<Value> {
    (0..row.columns().len())
        .map(|idx| cell_to_json(row, idx))
        .collect()
}

/// Decode one cell into JSON by the driver-reported type name, with a typed
/// fallback chain for anything the match misses.
fn cell_to_json(row: &MySqlRow, idx: usize) -> Value {
    let type_name = row.column(idx).type_info().name();

    match type_name {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
            .try_get::<Option<i64>, _>(idx)
            .ok()
            .flatten()
            .map(Value::from)
            .unwrap_or(Value::Null),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<Option<u64>, _>(idx)
            .ok()
            .flatten()
            .map(Value::from)
            .unwrap_or(Value::Null),
        "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(idx)
            .ok()
            .flatten()
            .map(Value::from)
            .unwrap_or(Value::Null),
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map(Value::from)
            .unwrap_or(Value::Null),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .ok()
            .flatten()
            .map(|d| json!(d.to_string()))
            .unwrap_or(Value::Null),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .ok()
            .flatten()
            .map(|dt| json!(dt.to_string()))
            .unwrap_or(Value::Null),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(idx)
            .ok()
            .flatten()
            .map(|t| json!(t.to_string()))
            .unwrap_or(Value::Null),
        _ => fallback_cell(row, idx),
    }
}

/// Covers VARCHAR/CHAR/TEXT/ENUM, DECIMAL, and anything the driver reports
/// under a name the match above does not know.
fn fallback_cell(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(idx) {
        return Value::String(s);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(idx) {
        return Value::from(n);
    }
    if let Ok(Some(f)) = row.try_get::<Option<f64>, _>(idx) {
        return Value::from(f);
    }
    if let Ok(Some(bytes)) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return Value::String(String::from_utf8_lossy(&bytes).into_owned());
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_statement_quotes_identifiers_and_binds_values() {
        let sql = insert_statement(
            "Customers",
            &["C_Name".to_string(), "City".to_string(), "DOB".to_string()],
        );
        assert_eq!(
            sql,
            "INSERT INTO `Customers` (`C_Name`, `City`, `DOB`) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn insert_statement_single_column() {
        let sql = insert_statement("Outlet", &["Location".to_string()]);
        assert_eq!(sql, "INSERT INTO `Outlet` (`Location`) VALUES (?)");
    }

    // The page renders headers from `columns` alone; an empty table must
    // still serialize them.
    #[test]
    fn empty_result_set_keeps_its_columns() {
        let rs = ResultSet {
            columns: vec!["Order_ID".to_string(), "StatusOrder".to_string()],
            rows: vec![],
        };
        let json = serde_json::to_value(&rs).unwrap();
        assert_eq!(json["columns"][0], "Order_ID");
        assert_eq!(json["columns"][1], "StatusOrder");
        assert!(json["rows"].as_array().unwrap().is_empty());
    }
}
