//! Generic record insert endpoint
//!
//! Accepts `{table, columns, values}` for local data seeding. The table
//! and every column must match the closed registry exactly; every value
//! passes the insert sanitizer and is bound, never spliced.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::records;
use crate::domain::selection::is_clean_insert;

/// Shared state for the record insert endpoint
#[derive(Clone)]
pub struct RecordsApiState {
    pub database: Arc<SqliteService>,
}

/// Build record insert routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = RecordsApiState { database };

    Router::new().route("/", post(insert_record)).with_state(state)
}

/// Request body for a generic insert
#[derive(Debug, Deserialize, Validate)]
pub struct InsertRecordRequest {
    #[validate(length(min = 1, max = 64, message = "Table must be 1-64 characters"))]
    pub table: String,

    #[validate(length(min = 1, max = 32, message = "Between 1 and 32 columns required"))]
    pub columns: Vec<String>,

    #[validate(length(min = 1, max = 32, message = "Between 1 and 32 values required"))]
    pub values: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InsertRecordResponse {
    pub inserted: u64,
}

/// Insert one row into an allow-listed table
pub async fn insert_record(
    State(state): State<RecordsApiState>,
    ValidatedJson(body): ValidatedJson<InsertRecordRequest>,
) -> Result<(StatusCode, Json<InsertRecordResponse>), ApiError> {
    if body.columns.len() != body.values.len() {
        return Err(ApiError::bad_request(
            "COLUMN_VALUE_MISMATCH",
            "The number of columns and values must match",
        ));
    }

    let spec = records::lookup_table(&body.table).ok_or_else(|| {
        ApiError::bad_request(
            "UNKNOWN_TABLE",
            format!("Cannot insert into table '{}'", body.table),
        )
    })?;

    for column in &body.columns {
        if !spec.columns.contains(&column.as_str()) {
            return Err(ApiError::bad_request(
                "UNKNOWN_COLUMN",
                format!("Table '{}' has no insertable column '{}'", spec.name, column),
            ));
        }
    }

    for value in &body.values {
        if !is_clean_insert(value) {
            return Err(ApiError::bad_request(
                "FORBIDDEN_CHARACTER",
                "A value contains a forbidden character",
            ));
        }
    }

    let inserted = records::insert_record(state.database.pool(), spec, &body.columns, &body.values)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok((
        StatusCode::CREATED,
        Json(InsertRecordResponse { inserted }),
    ))
}
