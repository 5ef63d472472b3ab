//! Validating request extractors
//!
//! Query and JSON extractors that deserialize, then run `validator`
//! constraints, turning both failure modes into the standard error body.

use std::ops::Deref;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;

/// Rejection carrying the standard error body
pub struct ValidationRejection(ApiError);

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<validator::ValidationErrors> for ValidationRejection {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: validation failed", field))
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        Self(ApiError::bad_request("VALIDATION_ERROR", details))
    }
}

/// Query extractor that validates after deserializing
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ValidationRejection(ApiError::bad_request("QUERY_PARSE_ERROR", e.body_text()))
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// JSON body extractor that validates after deserializing
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ValidationRejection(ApiError::bad_request("JSON_PARSE_ERROR", e.body_text()))
        })?;
        value.validate()?;
        Ok(Self(value))
    }
}
