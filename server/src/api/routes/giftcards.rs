//! Gift card API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::SqliteService;
use crate::data::sqlite::repositories::giftcards;
use crate::data::types::GiftCardRow;

/// Shared state for Gift card API endpoints
#[derive(Clone)]
pub struct GiftCardsApiState {
    pub database: Arc<SqliteService>,
}

/// Build Gift card API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = GiftCardsApiState { database };

    Router::new()
        .route("/", get(list_gift_cards))
        .route("/redeem", post(redeem_gift_card))
        .with_state(state)
}

/// Query params for listing gift cards
#[derive(Debug, Deserialize, Validate)]
pub struct ListGiftCardsQuery {
    /// With a user id, lists that user's claimed cards; without, the
    /// unclaimed catalog.
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: Option<i64>,
}

/// Request body for redeeming a gift card
#[derive(Debug, Deserialize, Validate)]
pub struct RedeemGiftCardRequest {
    #[validate(range(min = 1, message = "Card id must be positive"))]
    pub card_id: i64,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,
}

/// List gift cards, either the unclaimed catalog or one user's cards
pub async fn list_gift_cards(
    State(state): State<GiftCardsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListGiftCardsQuery>,
) -> Result<Json<Vec<GiftCardRow>>, ApiError> {
    let rows = match query.user_id {
        Some(user_id) => giftcards::list_for_user(state.database.pool(), user_id).await,
        None => giftcards::list_unclaimed(state.database.pool()).await,
    }
    .map_err(ApiError::from_sqlite)?;

    Ok(Json(rows))
}

/// Claim an unclaimed gift card
pub async fn redeem_gift_card(
    State(state): State<GiftCardsApiState>,
    ValidatedJson(body): ValidatedJson<RedeemGiftCardRequest>,
) -> Result<Json<GiftCardRow>, ApiError> {
    let card = giftcards::redeem(state.database.pool(), body.card_id, body.user_id)
        .await
        .map_err(ApiError::from_sqlite)?
        .ok_or_else(|| ApiError::not_found("CARD_NOT_FOUND", "Gift card not found"))?;

    Ok(Json(card))
}
