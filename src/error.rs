//! Domain error taxonomy.
//!
//! # Responsibilities
//! - One error kind per failure class with a stable message shape
//! - Map each kind to its HTTP status code
//! - Render the structured `{"error": message}` body
//!
//! # Design Decisions
//! - Storage and IO failures collapse to a generic 500; the body never
//!   carries internal detail
//! - Uniqueness violations are translated to "AlreadyExists" kinds at the
//!   failing store call, never surfaced raw

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Route not found")]
    RouteNotFound,

    /// One or more currency codes with no matching record.
    #[error("{}", currency_not_found_message(.0))]
    CurrencyNotFound(Vec<String>),

    #[error("Currency '{0}' already exists")]
    CurrencyAlreadyExists(String),

    #[error("Exchange rate {0} -> {1} not found")]
    ExchangeRateNotFound(String, String),

    #[error("Exchange rate {0} -> {1} already exists")]
    ExchangeRateAlreadyExists(String, String),

    #[error("Invalid pair format")]
    InvalidPairFormat,

    #[error("Missing required form field")]
    MissingRequiredField,

    #[error("Invalid amount format")]
    InvalidAmountFormat,

    #[error("Unknown currency code: {0}")]
    UnknownCurrencyCode(String),

    #[error("Internal Server Error")]
    Storage(#[from] rusqlite::Error),

    #[error("Internal Server Error")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    /// HTTP status code for this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound
            | ApiError::CurrencyNotFound(_)
            | ApiError::ExchangeRateNotFound(_, _) => StatusCode::NOT_FOUND,
            ApiError::CurrencyAlreadyExists(_) | ApiError::ExchangeRateAlreadyExists(_, _) => {
                StatusCode::CONFLICT
            }
            ApiError::InvalidPairFormat
            | ApiError::MissingRequiredField
            | ApiError::InvalidAmountFormat
            | ApiError::UnknownCurrencyCode(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Io(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Structured JSON error body.
    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

fn currency_not_found_message(codes: &[String]) -> String {
    match codes {
        [] => "Currency not found".to_string(),
        [code] => format!("Currency '{}' not found", code),
        many => format!("Currencies not found: '{}'", many.join("', '")),
    }
}
