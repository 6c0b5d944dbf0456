use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Error taxonomy for the dashboard glue layer.
///
/// `Connection` / `Query` / `Execution` mirror the three failure classes of
/// the data-access contract: the database was unreachable, a read was
/// malformed, or a write/procedure call was refused. Everything else is a
/// request the server rejected before touching the database.
#[derive(Debug, ThisError)]
pub enum DashError {
    #[error("database connection failed: {0}")]
    Connection(sqlx::Error),

    #[error("query failed: {0}")]
    Query(sqlx::Error),

    #[error("statement failed: {0}")]
    Execution(sqlx::Error),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown column {1} in table {0}")]
    UnknownColumn(String, String),

    #[error("rejected query: {0}")]
    RejectedQuery(String),

    #[error("invalid form value for column {column}: {reason}")]
    InvalidFormValue { column: String, reason: String },

    #[error("{0} returned no rows")]
    EmptyScalar(String),
}

impl IntoResponse for DashError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match &self {
            DashError::Connection(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: "CONNECTION_ERROR".to_string(),
                    message: "The database is unreachable or refused the credentials.".to_string(),
                },
            ),
            DashError::Query(e) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "QUERY_ERROR".to_string(),
                    message: e.to_string(),
                },
            ),
            DashError::Execution(e) => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "EXECUTION_ERROR".to_string(),
                    message: e.to_string(),
                },
            ),
            DashError::UnknownTable(_) | DashError::UnknownColumn(..) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "UNKNOWN_IDENTIFIER".to_string(),
                    message: self.to_string(),
                },
            ),
            DashError::RejectedQuery(_) | DashError::InvalidFormValue { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".to_string(),
                    message: self.to_string(),
                },
            ),
            DashError::EmptyScalar(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "EMPTY_RESULT".to_string(),
                    message: self.to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body; the page renders it as a banner.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
