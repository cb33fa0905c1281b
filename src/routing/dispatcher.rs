//! Request dispatch.
//!
//! # Responsibilities
//! - Parse the query string and request body into flat parameter maps
//! - Merge parameters (path over body over query)
//! - Split a path-bound currency pair into from/to
//! - Bind positional arguments and invoke the controller
//! - Normalize domain errors into `{"error": message}` bodies
//!
//! # Design Decisions
//! - Malformed bodies degrade to an empty map, never a crash
//! - Missing arguments are passed through as `None`; presence checks belong
//!   to the handlers

use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use serde_json::Value;
use url::form_urlencoded;

use crate::controller::Controller;
use crate::error::ApiError;
use crate::http::response::Payload;
use crate::routing::table::RouteTable;

pub struct Dispatcher {
    table: RouteTable,
    controller: Controller,
}

impl Dispatcher {
    pub fn new(table: RouteTable, controller: Controller) -> Self {
        Self { table, controller }
    }

    /// Dispatch one request. Every outcome, success or failure, comes back
    /// as a payload plus status code.
    pub fn handle(
        &self,
        method: &Method,
        path: &str,
        raw_query: Option<&str>,
        content_type: Option<&str>,
        body: &[u8],
    ) -> (Payload, StatusCode) {
        match self.dispatch(method, path, raw_query, content_type, body) {
            Ok((payload, status)) => (payload, status),
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::error!(method = %method, path, error = ?err, "request failed");
                } else {
                    tracing::warn!(method = %method, path, error = %err, "request rejected");
                }
                (Payload::Json(err.body()), status)
            }
        }
    }

    fn dispatch(
        &self,
        method: &Method,
        path: &str,
        raw_query: Option<&str>,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<(Payload, StatusCode), ApiError> {
        let mut params = parse_query(raw_query);
        // Body keys override query keys; path parameters override both.
        for (key, value) in parse_body(content_type, body) {
            params.insert(key, value);
        }

        let matched = self
            .table
            .lookup(method, path)
            .ok_or(ApiError::RouteNotFound)?;
        tracing::debug!(
            method = %method,
            path,
            operation = ?matched.entry.operation,
            "route matched"
        );

        let path_bound_pair = matched.path_params.contains_key("pair");
        for (key, value) in matched.path_params {
            params.insert(key, value);
        }
        if path_bound_pair {
            split_pair(&mut params, matched.entry.arg_names)?;
        }

        let args: Vec<Option<String>> = matched
            .entry
            .arg_names
            .iter()
            .map(|name| params.get(*name).cloned())
            .collect();

        self.controller.invoke(matched.entry.operation, &args)
    }
}

/// Flat query map; the last value wins for repeated keys.
fn parse_query(raw_query: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(query) = raw_query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
    }
    params
}

/// Parse the body per content type. Unknown types and malformed payloads
/// yield an empty map.
fn parse_body(content_type: Option<&str>, body: &[u8]) -> HashMap<String, String> {
    if body.is_empty() {
        return HashMap::new();
    }

    let media_type = content_type
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim();

    match media_type {
        "application/json" => match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .map(|(key, value)| (key, value_to_string(value)))
                .collect(),
            Ok(_) | Err(_) => {
                tracing::warn!("request body is not a JSON object, ignoring");
                HashMap::new()
            }
        },
        "application/x-www-form-urlencoded" => form_urlencoded::parse(body)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect(),
        other => {
            if !other.is_empty() {
                tracing::warn!(content_type = other, "unsupported content type, ignoring body");
            }
            HashMap::new()
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// `/exchangeRate/USDEUR` style captures: a path-bound `pair` is split into
/// `from`/`to` when the route declares both.
fn split_pair(params: &mut HashMap<String, String>, arg_names: &[&str]) -> Result<(), ApiError> {
    if !(arg_names.contains(&"from") && arg_names.contains(&"to")) {
        return Ok(());
    }
    let Some(pair) = params.get("pair").cloned() else {
        return Ok(());
    };
    if pair.len() != 6 || !pair.is_ascii() {
        tracing::warn!(pair = %pair, "malformed currency pair");
        return Err(ApiError::InvalidPairFormat);
    }
    params.insert("from".to_string(), pair[..3].to_ascii_uppercase());
    params.insert("to".to_string(), pair[3..].to_ascii_uppercase());
    Ok(())
}
