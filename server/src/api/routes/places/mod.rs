//! Place API endpoints
//!
//! The selection endpoint is the filter-compiler path: the raw expression
//! is compiled, its fields checked against the places allow-list, and the
//! bound form executed. The insert path uses the insert sanitizer variant
//! so ISO dates (with dashes) stay valid elsewhere while quotes and SQL
//! punctuation are rejected everywhere.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, PaginatedResponse};
use crate::data::SqliteService;
use crate::data::sqlite::repositories::{events, places};
use crate::data::types::{EventRow, PlaceRow};
use crate::domain::selection::{self, is_clean_insert};

use types::{
    CreatePlaceRequest, ListPlacesQuery, PlaceKeyQuery, ProjectionQuery, ProjectionResponse,
    SelectionQuery, SelectionResponse,
};

/// Shared state for Place API endpoints
#[derive(Clone)]
pub struct PlacesApiState {
    pub database: Arc<SqliteService>,
}

/// Build Place API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = PlacesApiState { database };

    Router::new()
        .route("/", get(list_places).post(create_place))
        .route("/selection", get(select_places))
        .route("/projection", get(project_places))
        .route("/events", get(place_events))
        .with_state(state)
}

/// List all places with pagination
pub async fn list_places(
    State(state): State<PlacesApiState>,
    ValidatedQuery(query): ValidatedQuery<ListPlacesQuery>,
) -> Result<Json<PaginatedResponse<PlaceRow>>, ApiError> {
    let (rows, total) = places::list_places(state.database.pool(), query.page, query.limit)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(PaginatedResponse::new(
        rows,
        query.page,
        query.limit,
        total,
    )))
}

/// Create a place
pub async fn create_place(
    State(state): State<PlacesApiState>,
    ValidatedJson(body): ValidatedJson<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<PlaceRow>), ApiError> {
    check_insert_clean("name", &body.name)?;
    check_insert_clean("address", &body.address)?;
    check_insert_clean("type", &body.place_type)?;
    if let Some(description) = &body.description {
        check_insert_clean("description", description)?;
    }

    let row = places::create_place(
        state.database.pool(),
        &body.name,
        &body.address,
        &body.place_type,
        body.description.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Run a free-text filter expression against places
pub async fn select_places(
    State(state): State<PlacesApiState>,
    ValidatedQuery(query): ValidatedQuery<SelectionQuery>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let filter = selection::compile(&query.filter).map_err(ApiError::from_selection)?;
    filter
        .validate_fields(places::FILTER_FIELDS)
        .map_err(ApiError::from_selection)?;

    let rows = places::select_places(state.database.pool(), &filter)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(SelectionResponse {
        data: rows,
        condition: filter.fragment(),
    }))
}

/// Project an allow-listed subset of place attributes
pub async fn project_places(
    State(state): State<PlacesApiState>,
    ValidatedQuery(query): ValidatedQuery<ProjectionQuery>,
) -> Result<Json<ProjectionResponse>, ApiError> {
    let attributes: Vec<String> = query
        .attributes
        .split(',')
        .map(|a| a.trim().to_ascii_lowercase())
        .filter(|a| !a.is_empty())
        .collect();

    if attributes.is_empty() {
        return Err(ApiError::bad_request(
            "EMPTY_PROJECTION",
            "At least one attribute is required",
        ));
    }
    for attribute in &attributes {
        if !places::PROJECTION_FIELDS.contains(&attribute.as_str()) {
            return Err(ApiError::bad_request(
                "UNKNOWN_ATTRIBUTE",
                format!("Cannot project attribute '{}'", attribute),
            ));
        }
    }

    let rows = places::project_places(state.database.pool(), &attributes)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(ProjectionResponse {
        attributes,
        data: rows.into_iter().map(|r| r.values).collect(),
    }))
}

/// All events occurring at one place
pub async fn place_events(
    State(state): State<PlacesApiState>,
    ValidatedQuery(query): ValidatedQuery<PlaceKeyQuery>,
) -> Result<Json<Vec<EventRow>>, ApiError> {
    let place = places::get_place(state.database.pool(), &query.name, &query.address)
        .await
        .map_err(ApiError::from_sqlite)?;
    if place.is_none() {
        return Err(ApiError::not_found("PLACE_NOT_FOUND", "Place not found"));
    }

    let rows = events::list_for_place(state.database.pool(), &query.name, &query.address)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}

fn check_insert_clean(field: &str, value: &str) -> Result<(), ApiError> {
    if !is_clean_insert(value) {
        return Err(ApiError::bad_request(
            "FORBIDDEN_CHARACTER",
            format!("Field '{}' contains a forbidden character", field),
        ));
    }
    Ok(())
}
