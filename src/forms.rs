use crate::db::{ColumnDescriptor, SqlValue, TypeBucket};
use crate::error::DashError;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Columns the database assigns itself on insert. This is a fixed
/// configuration list, not derived from AUTO_INCREMENT metadata; it has to
/// be kept in sync with the real schema by hand.
pub const EXCLUDED_COLUMNS: &[&str] = &["Order_ID", "Cake_ID"];

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: String,
    pub declared_type: String,
    pub bucket: TypeBucket,
}

/// The insert form for one table: one field per non-excluded column, in
/// declaration order. The page renders a number, date, or text input per
/// field's bucket.
#[derive(Debug, Serialize)]
pub struct FormSpec {
    pub table: String,
    pub fields: Vec<FormField>,
}

pub fn build_form(table: &str, columns: &[ColumnDescriptor]) -> FormSpec {
    let fields = columns
        .iter()
        .filter(|c| !EXCLUDED_COLUMNS.iter().any(|x| x.eq_ignore_ascii_case(&c.name)))
        .map(|c| FormField {
            name: c.name.clone(),
            declared_type: c.declared_type.clone(),
            bucket: c.bucket,
        })
        .collect();
    FormSpec {
        table: table.to_string(),
        fields,
    }
}

/// Coerce a posted JSON object into ordered `(column, value)` pairs, one per
/// form field. Each value must fit its field's bucket; anything else is a
/// validation error, surfaced as a banner, never a panic.
pub fn collect_values(
    spec: &FormSpec,
    payload: &Map<String, Value>,
) -> Result<Vec<(String, SqlValue)>, DashError> {
    spec.fields
        .iter()
        .map(|field| {
            let raw = payload.get(&field.name).ok_or_else(|| DashError::InvalidFormValue {
                column: field.name.clone(),
                reason: "missing value".to_string(),
            })?;
            let value = coerce(field, raw)?;
            Ok((field.name.clone(), value))
        })
        .collect()
}

fn coerce(field: &FormField, raw: &Value) -> Result<SqlValue, DashError> {
    let invalid = |reason: &str| DashError::InvalidFormValue {
        column: field.name.clone(),
        reason: reason.to_string(),
    };

    match field.bucket {
        TypeBucket::Integer => match raw {
            Value::Number(n) => n
                .as_i64()
                .map(SqlValue::Int)
                .ok_or_else(|| invalid("not an integer")),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(SqlValue::Int)
                .map_err(|_| invalid("not an integer")),
            _ => Err(invalid("expected an integer")),
        },
        TypeBucket::Date => match raw {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(SqlValue::Date)
                .map_err(|_| invalid("expected a YYYY-MM-DD date")),
            _ => Err(invalid("expected a YYYY-MM-DD date")),
        },
        TypeBucket::Text => match raw {
            Value::String(s) => Ok(SqlValue::Text(s.clone())),
            Value::Number(n) => Ok(SqlValue::Text(n.to_string())),
            _ => Err(invalid("expected text")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnDescriptor> {
        [
            ("Cake_ID", "int(11)"),
            ("C_Name", "varchar(50)"),
            ("Price", "decimal(8,2)"),
            ("Launch_Date", "date"),
            ("Stock", "int(11)"),
        ]
        .into_iter()
        .map(|(name, ty)| ColumnDescriptor {
            name: name.to_string(),
            declared_type: ty.to_string(),
            bucket: crate::db::introspect::classify(ty),
        })
        .collect()
    }

    #[test]
    fn build_form_skips_excluded_columns() {
        let spec = build_form("Cake_Catalogue", &columns());
        let names: Vec<&str> = spec.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["C_Name", "Price", "Launch_Date", "Stock"]);
    }

    #[test]
    fn collect_values_preserves_field_order_and_coerces() {
        let spec = build_form("Cake_Catalogue", &columns());
        let payload = json!({
            "C_Name": "Black Forest",
            "Price": "450.00",
            "Launch_Date": "2024-02-14",
            "Stock": "25",
        });
        let values = collect_values(&spec, payload.as_object().unwrap()).unwrap();
        assert_eq!(
            values,
            vec![
                ("C_Name".to_string(), SqlValue::Text("Black Forest".to_string())),
                ("Price".to_string(), SqlValue::Text("450.00".to_string())),
                (
                    "Launch_Date".to_string(),
                    SqlValue::Date(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
                ),
                ("Stock".to_string(), SqlValue::Int(25)),
            ]
        );
    }

    #[test]
    fn collect_values_accepts_json_numbers_for_integer_bucket() {
        let spec = build_form("Cake_Catalogue", &columns());
        let payload = json!({
            "C_Name": "Red Velvet",
            "Price": 520,
            "Launch_Date": "2023-11-01",
            "Stock": 12,
        });
        let values = collect_values(&spec, payload.as_object().unwrap()).unwrap();
        assert!(values.contains(&("Stock".to_string(), SqlValue::Int(12))));
        assert!(values.contains(&("Price".to_string(), SqlValue::Text("520".to_string()))));
    }

    #[test]
    fn collect_values_rejects_bad_date() {
        let spec = build_form("Cake_Catalogue", &columns());
        let payload = json!({
            "C_Name": "x", "Price": "1", "Launch_Date": "14-02-2024", "Stock": 1,
        });
        let err = collect_values(&spec, payload.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, DashError::InvalidFormValue { column, .. } if column == "Launch_Date"));
    }

    #[test]
    fn collect_values_rejects_missing_column() {
        let spec = build_form("Cake_Catalogue", &columns());
        let payload = json!({ "C_Name": "x", "Price": "1", "Launch_Date": "2024-01-01" });
        let err = collect_values(&spec, payload.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, DashError::InvalidFormValue { column, .. } if column == "Stock"));
    }

    #[test]
    fn collect_values_rejects_non_numeric_integer() {
        let spec = build_form("Cake_Catalogue", &columns());
        let payload = json!({
            "C_Name": "x", "Price": "1", "Launch_Date": "2024-01-01", "Stock": "many",
        });
        assert!(collect_values(&spec, payload.as_object().unwrap()).is_err());
    }
}
