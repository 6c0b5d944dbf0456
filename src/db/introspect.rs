use crate::error::DashError;
use serde::Serialize;
use sqlx::Row;
use sqlx::mysql::{MySqlConnection, MySqlRow};

/// The only type system the dashboard has: every declared column type is
/// classified into one of three buckets, which in turn picks the form
/// control. This is a fallback mapping over driver-reported type strings,
/// not a full SQL type mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeBucket {
    Integer,
    Date,
    Text,
}

pub fn classify(declared_type: &str) -> TypeBucket {
    let lower = declared_type.to_ascii_lowercase();
    if lower.contains("int") {
        TypeBucket::Integer
    } else if lower.contains("date") {
        TypeBucket::Date
    } else {
        TypeBucket::Text
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub declared_type: String,
    pub bucket: TypeBucket,
}

/// `SHOW TABLES`, in the database's own order.
pub async fn list_tables(conn: &mut MySqlConnection) -> Result<Vec<String>, DashError> {
    let rows = sqlx::query("SHOW TABLES")
        .fetch_all(conn)
        .await
        .map_err(DashError::Query)?;
    Ok(rows.iter().map(|r| string_cell(r, 0)).collect())
}

/// `DESCRIBE <table>`, one descriptor per column in declaration order.
/// `table` must come out of [`require_table`] first; DESCRIBE cannot take a
/// bound parameter, so the identifier is interpolated after validation.
pub async fn list_columns(
    conn: &mut MySqlConnection,
    table: &str,
) -> Result<Vec<ColumnDescriptor>, DashError> {
    let rows = sqlx::query(&format!("DESCRIBE `{table}`"))
        .fetch_all(conn)
        .await
        .map_err(DashError::Query)?;
    Ok(rows
        .iter()
        .map(|r| {
            let name = string_cell(r, 0);
            let declared_type = string_cell(r, 1);
            let bucket = classify(&declared_type);
            ColumnDescriptor {
                name,
                declared_type,
                bucket,
            }
        })
        .collect())
}

/// Resolve a user-supplied table name against the live schema. Returns the
/// canonical name so later interpolation uses the database's own spelling.
pub async fn require_table(
    conn: &mut MySqlConnection,
    name: &str,
) -> Result<String, DashError> {
    let tables = list_tables(conn).await?;
    tables
        .into_iter()
        .find(|t| t.eq_ignore_ascii_case(name))
        .ok_or_else(|| DashError::UnknownTable(name.to_string()))
}

/// Resolve a user-supplied column name against the table's live columns.
pub async fn require_column(
    conn: &mut MySqlConnection,
    table: &str,
    name: &str,
) -> Result<String, DashError> {
    let columns = list_columns(conn, table).await?;
    columns
        .into_iter()
        .map(|c| c.name)
        .find(|c| c.eq_ignore_ascii_case(name))
        .ok_or_else(|| DashError::UnknownColumn(table.to_string(), name.to_string()))
}

// SHOW/DESCRIBE report text columns whose concrete wire type varies across
// server versions, so decode defensively.
fn string_cell(row: &MySqlRow, idx: usize) -> String {
    if let Ok(s) = row.try_get::<String, _>(idx) {
        return s;
    }
    row.try_get::<Vec<u8>, _>(idx)
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_like_types_classify_as_integer() {
        for t in ["int", "int(11)", "bigint(20)", "smallint", "TINYINT(1)", "mediumint"] {
            assert_eq!(classify(t), TypeBucket::Integer, "{t}");
        }
    }

    #[test]
    fn date_like_types_classify_as_date() {
        for t in ["date", "DATE", "datetime"] {
            assert_eq!(classify(t), TypeBucket::Date, "{t}");
        }
    }

    #[test]
    fn everything_else_classifies_as_text() {
        for t in ["varchar(50)", "decimal(8,2)", "text", "enum('a','b')", "char(3)", "float"] {
            assert_eq!(classify(t), TypeBucket::Text, "{t}");
        }
    }
}
