use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Seconds a client is asked to wait when the database is unreachable.
const UNAVAILABLE_RETRY_AFTER: u64 = 5;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `ROW_COUNT_MISMATCH`, `CONSTRAINT_VIOLATION`, `CONFLICT`,
    /// `SERVICE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "resource_name must be 1-256 characters")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// A lookup by id matched no row.
    NotFound(String),
    /// An update or delete did not affect exactly one row.
    RowCountMismatch(String),
    /// A foreign-key check failed in the database.
    ConstraintViolation(String),
    Conflict(String),
    /// The database could not be reached. Transient.
    Unavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::RowCountMismatch(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "ROW_COUNT_MISMATCH",
                    message: msg,
                },
            ),
            AppError::ConstraintViolation(detail) => {
                tracing::warn!("Constraint violation: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        code: "CONSTRAINT_VIOLATION",
                        message: "A referenced record does not exist".into(),
                    },
                )
            }
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::Unavailable(detail) => {
                tracing::error!("Database unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "SERVICE_UNAVAILABLE",
                        message: format!(
                            "Database unavailable. Try again in {} seconds",
                            UNAVAILABLE_RETRY_AFTER
                        ),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let unavailable = matches!(self, AppError::Unavailable(_));

        let (status, body) = self.status_and_body();

        if unavailable {
            (
                status,
                [("Retry-After", UNAVAILABLE_RETRY_AFTER.to_string())],
                Json(body),
            )
                .into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::ForeignKeyConstraintViolation(detail)) = err.sql_err() {
            return AppError::ConstraintViolation(detail);
        }
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => AppError::Unavailable(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}
