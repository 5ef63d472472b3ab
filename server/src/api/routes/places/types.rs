//! Place API types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::types::{default_limit, default_page, validate_limit, validate_page};
use crate::data::types::PlaceRow;

/// Request body for creating a place
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "Type must be 1-50 characters"))]
    pub place_type: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Query params for listing places
#[derive(Debug, Deserialize, Validate)]
pub struct ListPlacesQuery {
    #[serde(default = "default_page")]
    #[validate(custom(function = "validate_page"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(custom(function = "validate_limit"))]
    pub limit: u32,
}

/// Query params for the filter selection endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct SelectionQuery {
    #[validate(length(min = 1, max = 512, message = "Filter must be 1-512 characters"))]
    pub filter: String,
}

/// Selection response: matching places plus the compiled condition
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub data: Vec<PlaceRow>,
    pub condition: String,
}

/// Query params for the projection endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectionQuery {
    #[validate(length(min = 1, max = 256, message = "Attributes must be 1-256 characters"))]
    pub attributes: String,
}

/// Projection response: requested attributes and one value array per row
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub attributes: Vec<String>,
    pub data: Vec<Vec<serde_json::Value>>,
}

/// Query params identifying one place by its composite key
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceKeyQuery {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,
}
