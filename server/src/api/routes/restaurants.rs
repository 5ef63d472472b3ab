//! Restaurant API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedQuery;
use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::restaurants;
use crate::data::types::CuisineRatingRow;

/// Shared state for Restaurant API endpoints
#[derive(Clone)]
pub struct RestaurantsApiState {
    pub database: Arc<SqliteService>,
}

/// Build Restaurant API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = RestaurantsApiState { database };

    Router::new()
        .route("/cuisines", get(cuisines_above_threshold))
        .with_state(state)
}

fn validate_threshold(threshold: f64) -> Result<(), ValidationError> {
    if !(0.0..=5.0).contains(&threshold) {
        return Err(ValidationError::new("threshold_range")
            .with_message("Threshold must be between 0 and 5".into()));
    }
    Ok(())
}

/// Query params for the cuisine rating aggregation
#[derive(Debug, Deserialize, Validate)]
pub struct CuisinesQuery {
    #[validate(custom(function = "validate_threshold"))]
    pub threshold: f64,
}

/// Cuisines whose average restaurant rating is above the threshold
pub async fn cuisines_above_threshold(
    State(state): State<RestaurantsApiState>,
    ValidatedQuery(query): ValidatedQuery<CuisinesQuery>,
) -> Result<Json<Vec<CuisineRatingRow>>, ApiError> {
    let rows = restaurants::cuisines_above_threshold(state.database.pool(), query.threshold)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}
