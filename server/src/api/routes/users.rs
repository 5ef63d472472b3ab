//! User API endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::notifications;
use crate::data::types::NotificationRow;

/// Shared state for User API endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub database: Arc<SqliteService>,
}

/// Build User API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = UsersApiState { database };

    Router::new()
        .route("/{user_id}/notifications", get(list_notifications))
        .with_state(state)
}

/// Notifications delivered to one user, newest first
pub async fn list_notifications(
    State(state): State<UsersApiState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<NotificationRow>>, ApiError> {
    if !notifications::user_exists(state.database.pool(), user_id)
        .await
        .map_err(ApiError::from_sqlite)?
    {
        return Err(ApiError::not_found("USER_NOT_FOUND", "User not found"));
    }

    let rows = notifications::list_for_user(state.database.pool(), user_id)
        .await
        .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}
