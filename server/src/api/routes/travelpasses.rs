//! Travel pass API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::travelpasses;
use crate::data::types::TravelPassRow;

/// Shared state for Travel pass API endpoints
#[derive(Clone)]
pub struct TravelPassesApiState {
    pub database: Arc<SqliteService>,
}

/// Build Travel pass API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = TravelPassesApiState { database };

    Router::new()
        .route("/", get(list_travel_passes))
        .route("/redeem", post(redeem_travel_pass))
        .with_state(state)
}

/// Query params for listing travel passes
#[derive(Debug, Deserialize, Validate)]
pub struct ListTravelPassesQuery {
    /// With a user id, lists passes that user holds; without, the full
    /// catalog.
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: Option<i64>,
}

/// Request body for acquiring a travel pass
#[derive(Debug, Deserialize, Validate)]
pub struct RedeemTravelPassRequest {
    #[validate(range(min = 1, message = "Pass id must be positive"))]
    pub pass_id: i64,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,
}

/// List travel passes, either the catalog or one user's holdings
pub async fn list_travel_passes(
    State(state): State<TravelPassesApiState>,
    ValidatedQuery(query): ValidatedQuery<ListTravelPassesQuery>,
) -> Result<Json<Vec<TravelPassRow>>, ApiError> {
    let rows = match query.user_id {
        Some(user_id) => travelpasses::list_for_user(state.database.pool(), user_id).await,
        None => travelpasses::list_passes(state.database.pool()).await,
    }
    .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}

/// Acquire a travel pass for a user
pub async fn redeem_travel_pass(
    State(state): State<TravelPassesApiState>,
    ValidatedJson(body): ValidatedJson<RedeemTravelPassRequest>,
) -> Result<Json<TravelPassRow>, ApiError> {
    let pass = travelpasses::redeem(state.database.pool(), body.pass_id, body.user_id)
        .await
        .map_err(ApiError::from_sqlite)?
        .ok_or_else(|| ApiError::not_found("PASS_NOT_FOUND", "Travel pass not found"))?;

    Ok(Json(pass))
}
