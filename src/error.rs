use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level error taxonomy.
///
/// - [`AppError::NotFound`] is a normal outcome on the redirect path (absent
///   or expired code), not an exceptional condition.
/// - [`AppError::Storage`] means the durable store could not be reached; it is
///   fatal to the calling operation and kept distinct from `NotFound` so an
///   operator can tell "absent" from "store down".
/// - [`AppError::GenerationExhausted`] is returned when the bounded
///   collision-retry loop runs out of attempts.
///
/// Cache failures surface as `infrastructure::cache::CacheError` at the
/// component boundary; each caller decides whether to degrade or fail.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Storage { message: String, details: Value },
    GenerationExhausted { attempts: usize },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. } => write!(f, "validation error: {}", message),
            AppError::NotFound { message, .. } => write!(f, "not found: {}", message),
            AppError::Conflict { message, .. } => write!(f, "conflict: {}", message),
            AppError::Storage { message, .. } => write!(f, "storage unavailable: {}", message),
            AppError::GenerationExhausted { attempts } => {
                write!(f, "code generation exhausted after {} attempts", attempts)
            }
            AppError::Internal { message, .. } => write!(f, "internal error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Storage { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "storage_unavailable",
                message,
                details,
            ),
            AppError::GenerationExhausted { attempts } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "generation_exhausted",
                "Failed to generate a unique short code".to_string(),
                json!({ "attempts": attempts }),
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps low-level sqlx failures into the application taxonomy.
///
/// Connectivity failures become [`AppError::Storage`]; unique-constraint
/// violations become [`AppError::Conflict`] so the shorten path can treat a
/// code-insert race as a collision and retry.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
        return AppError::internal("Database error", json!({}));
    }

    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => AppError::storage("Database unreachable", json!({})),
        _ => AppError::internal("Database error", json!({})),
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({})),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = AppError::not_found("Short link not found", json!({ "code": "abc123" }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_generation_exhausted_display() {
        let err = AppError::GenerationExhausted { attempts: 16 };
        assert!(err.to_string().contains("16"));
    }

    #[test]
    fn test_storage_distinct_from_not_found() {
        let storage = AppError::storage("Database unreachable", json!({}));
        let not_found = AppError::not_found("missing", json!({}));
        assert!(matches!(storage, AppError::Storage { .. }));
        assert!(matches!(not_found, AppError::NotFound { .. }));
    }
}
