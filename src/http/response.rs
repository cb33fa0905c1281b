//! Response payloads produced by the dispatch pipeline.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// What a handler hands back to the HTTP layer. Almost everything is JSON;
/// the index page and favicon are the exceptions.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Html(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value).map_err(|_| ApiError::Internal)?;
        Ok(Payload::Json(value))
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        match self {
            Payload::Json(value) => (status, Json(value)).into_response(),
            Payload::Html(markup) => (status, Html(markup)).into_response(),
            Payload::Binary(bytes) => (
                status,
                [(header::CONTENT_TYPE, "image/x-icon")],
                bytes,
            )
                .into_response(),
        }
    }
}
