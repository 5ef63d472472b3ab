//! Shared API types
//!
//! Error handling and pagination helpers used across all endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::ValidationError;

use crate::core::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::data::sqlite::SqliteError;
use crate::domain::selection::SelectionError;

/// Default page number
pub const DEFAULT_PAGE: u32 = 1;
/// Maximum page number to prevent expensive OFFSET queries
pub const MAX_PAGE: u32 = 100;

/// Validator function for page parameter
pub fn validate_page(page: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::new("page_min").with_message("Page must be >= 1".into()));
    }
    if page > MAX_PAGE {
        return Err(ValidationError::new("page_max").with_message(
            format!("Page must be <= {} to prevent expensive queries", MAX_PAGE).into(),
        ));
    }
    Ok(())
}

/// Validator function for limit parameter
pub fn validate_limit(limit: u32) -> Result<(), ValidationError> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ValidationError::new("limit_range")
            .with_message(format!("Limit must be between 1 and {}", MAX_PAGE_SIZE).into()));
    }
    Ok(())
}

pub fn default_page() -> u32 {
    DEFAULT_PAGE
}

pub fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Map a database error.
    ///
    /// Conflicts surface as 409, foreign key failures as 400 (the caller
    /// referenced something that does not exist), everything else as a
    /// generic 500 so internals never leak.
    pub fn from_sqlite(e: SqliteError) -> Self {
        match e {
            SqliteError::Conflict(message) => Self::Conflict {
                code: "CONFLICT".to_string(),
                message,
            },
            e if e.is_foreign_key_violation() => Self::BadRequest {
                code: "FOREIGN_KEY".to_string(),
                message: "Referenced record does not exist".to_string(),
            },
            e if e.is_unique_violation() => Self::Conflict {
                code: "DUPLICATE".to_string(),
                message: "Record already exists".to_string(),
            },
            e => {
                tracing::error!(error = %e, "SQLite error");
                Self::Internal {
                    message: "Database operation failed".to_string(),
                }
            }
        }
    }

    /// Map a filter compilation error to 400 with a stable code
    pub fn from_selection(e: SelectionError) -> Self {
        let code = match &e {
            SelectionError::EmptyInput => "EMPTY_FILTER",
            SelectionError::ForbiddenCharacter(_) => "FORBIDDEN_CHARACTER",
            SelectionError::Malformed(_) => "MALFORMED_FILTER",
            SelectionError::UnknownField(_) => "UNKNOWN_FIELD",
        };
        Self::BadRequest {
            code: code.to_string(),
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Pagination metadata in response
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total_items: u64) -> Self {
        Self {
            page,
            limit,
            total_items,
            total_pages: total_items.div_ceil(limit as u64),
        }
    }
}

/// Generic paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u32, limit: u32, total_items: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(page, limit, total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(1, 50, 101);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_validate_page_bounds() {
        assert!(validate_page(1).is_ok());
        assert!(validate_page(MAX_PAGE).is_ok());
        assert!(validate_page(0).is_err());
        assert!(validate_page(MAX_PAGE + 1).is_err());
    }

    #[test]
    fn test_validate_limit_bounds() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_PAGE_SIZE).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_selection_error_codes() {
        let err = ApiError::from_selection(SelectionError::ForbiddenCharacter('\''));
        match err {
            ApiError::BadRequest { code, .. } => assert_eq!(code, "FORBIDDEN_CHARACTER"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err = ApiError::from_sqlite(SqliteError::Conflict("claimed".to_string()));
        assert!(matches!(err, ApiError::Conflict { .. }));
    }
}
