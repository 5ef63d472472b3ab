//! Event API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::events;
use crate::data::types::{EventRow, PlaceRatingRow};
use crate::domain::selection::is_clean_insert;

/// Shared state for Event API endpoints
#[derive(Clone)]
pub struct EventsApiState {
    pub database: Arc<SqliteService>,
}

/// Build Event API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = EventsApiState { database };

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/ratings", get(event_ratings))
        .with_state(state)
}

/// Validate a YYYY-MM-DD date string
fn validate_date(date: &str) -> Result<(), ValidationError> {
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(ValidationError::new("date_format")
            .with_message("Date must be in YYYY-MM-DD format".into()));
    }
    Ok(())
}

/// Query params for listing events, optionally date-bounded
#[derive(Debug, Deserialize, Validate)]
pub struct ListEventsQuery {
    #[validate(custom(function = "validate_date"))]
    pub after: Option<String>,

    #[validate(custom(function = "validate_date"))]
    pub before: Option<String>,
}

/// Request body for creating an event
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(custom(function = "validate_date"))]
    pub event_date: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Place name must be 1-100 characters"))]
    pub place_name: String,

    #[validate(length(min = 1, max = 200, message = "Place address must be 1-200 characters"))]
    pub place_address: String,
}

/// List events, bounded by `after` or `before` when given
pub async fn list_events(
    State(state): State<EventsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListEventsQuery>,
) -> Result<Json<Vec<EventRow>>, ApiError> {
    let rows = events::list_events(
        state.database.pool(),
        query.after.as_deref(),
        query.before.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}

/// Create an event at an existing place
pub async fn create_event(
    State(state): State<EventsApiState>,
    ValidatedJson(body): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventRow>), ApiError> {
    for (field, value) in [
        ("title", body.title.as_str()),
        ("place_name", body.place_name.as_str()),
        ("place_address", body.place_address.as_str()),
    ] {
        if !is_clean_insert(value) {
            return Err(ApiError::bad_request(
                "FORBIDDEN_CHARACTER",
                format!("Field '{}' contains a forbidden character", field),
            ));
        }
    }
    if let Some(description) = &body.description
        && !is_clean_insert(description)
    {
        return Err(ApiError::bad_request(
            "FORBIDDEN_CHARACTER",
            "Field 'description' contains a forbidden character",
        ));
    }

    let row = events::create_event(
        state.database.pool(),
        &body.title,
        &body.event_date,
        body.description.as_deref(),
        body.rating,
        &body.place_name,
        &body.place_address,
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Average event rating per place
pub async fn event_ratings(
    State(state): State<EventsApiState>,
) -> Result<Json<Vec<PlaceRatingRow>>, ApiError> {
    let rows = events::average_rating_per_place(state.database.pool())
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}
