//! Typed database rows
//!
//! Shared between the sqlite repositories and the route handlers so the
//! API serializes rows without per-endpoint re-mapping.

use serde::{Deserialize, Serialize};

// ============================================================================
// Places
// ============================================================================

/// Place row. `name` + `address` form the key; two places may share a
/// name but never an address as well.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlaceRow {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub place_type: String,
    pub description: Option<String>,
    pub created_at: i64,
}

/// One row of a place projection: the requested attributes only, in
/// request order.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionRow {
    pub values: Vec<serde_json::Value>,
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRow {
    pub id: i64,
    pub title: String,
    pub event_date: String,
    pub description: Option<String>,
    pub rating: Option<i64>,
    pub place_name: String,
    pub place_address: String,
}

/// Average event rating aggregated per place.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlaceRatingRow {
    pub place_name: String,
    pub place_address: String,
    pub average_rating: f64,
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub place_name: String,
    pub place_address: String,
    pub rating: i64,
    pub message: Option<String>,
    pub created_at: i64,
}

// ============================================================================
// Gift cards
// ============================================================================

/// Gift card row. `user_id` is NULL until the card is claimed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GiftCardRow {
    pub id: i64,
    pub franchise: String,
    pub value: i64,
    pub points: i64,
    pub user_id: Option<i64>,
}

// ============================================================================
// Travel passes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TravelPassRow {
    pub id: i64,
    pub name: String,
    pub cost: i64,
    pub start_date: String,
    pub end_date: String,
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub message: String,
    pub created_at: i64,
}

// ============================================================================
// Restaurants
// ============================================================================

/// Cuisine with its average restaurant rating, for the threshold
/// aggregation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CuisineRatingRow {
    pub cuisine: String,
    pub average_rating: f64,
}
