//! Review API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::{places, reviews};
use crate::data::types::ReviewRow;
use crate::domain::selection::is_clean_insert;

/// Shared state for Review API endpoints
#[derive(Clone)]
pub struct ReviewsApiState {
    pub database: Arc<SqliteService>,
}

/// Build Review API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = ReviewsApiState { database };

    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .with_state(state)
}

/// Query params identifying the reviewed place
#[derive(Debug, Deserialize, Validate)]
pub struct ListReviewsQuery {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,
}

/// Request body for creating a review
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, max = 100, message = "Place name must be 1-100 characters"))]
    pub place_name: String,

    #[validate(length(min = 1, max = 200, message = "Place address must be 1-200 characters"))]
    pub place_address: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,

    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

/// Reviews for one place, newest first
pub async fn list_reviews(
    State(state): State<ReviewsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListReviewsQuery>,
) -> Result<Json<Vec<ReviewRow>>, ApiError> {
    let place = places::get_place(state.database.pool(), &query.name, &query.address)
        .await
        .map_err(ApiError::from_sqlite)?;
    if place.is_none() {
        return Err(ApiError::not_found("PLACE_NOT_FOUND", "Place not found"));
    }

    let rows = reviews::list_for_place(state.database.pool(), &query.name, &query.address)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}

/// Create a review
pub async fn create_review(
    State(state): State<ReviewsApiState>,
    ValidatedJson(body): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewRow>), ApiError> {
    if let Some(message) = &body.message
        && !is_clean_insert(message)
    {
        return Err(ApiError::bad_request(
            "FORBIDDEN_CHARACTER",
            "Field 'message' contains a forbidden character",
        ));
    }

    let row = reviews::create_review(
        state.database.pool(),
        body.user_id,
        &body.place_name,
        &body.place_address,
        body.rating,
        body.message.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    Ok((StatusCode::CREATED, Json(row)))
}
