//! Route table: static and parameterized routes.
//!
//! # Responsibilities
//! - Map (method, path) to an operation plus its ordered argument names
//! - Bind `:name` pattern segments to path parameter values
//!
//! # Design Decisions
//! - Handlers are a closed enum, not trait objects; argument binding is an
//!   explicit ordered contract per route
//! - Parameter segments bind regardless of content; no type validation at
//!   this layer

use std::collections::HashMap;

use axum::http::Method;

/// The closed set of business operations a route can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListCurrencies,
    GetCurrency,
    AddCurrency,
    GetExchangeRate,
    AddExchangeRate,
    UpdateExchangeRate,
    ListExchangeRates,
    Convert,
    DeleteAllCurrencies,
    IndexPage,
    Favicon,
}

/// A registered route target: the operation and the names of the arguments
/// it expects, in positional order.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub operation: Operation,
    pub arg_names: &'static [&'static str],
}

#[derive(Debug)]
struct DynamicRoute {
    method: Method,
    pattern: String,
    entry: RouteEntry,
}

/// Outcome of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch {
    pub entry: RouteEntry,
    pub path_params: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct RouteTable {
    static_routes: HashMap<(Method, String), RouteEntry>,
    dynamic_routes: Vec<DynamicRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_static(
        &mut self,
        method: Method,
        path: &str,
        operation: Operation,
        arg_names: &'static [&'static str],
    ) {
        self.static_routes
            .insert((method, path.to_string()), RouteEntry { operation, arg_names });
    }

    pub fn register_dynamic(
        &mut self,
        method: Method,
        pattern: &str,
        operation: Operation,
        arg_names: &'static [&'static str],
    ) {
        self.dynamic_routes.push(DynamicRoute {
            method,
            pattern: pattern.to_string(),
            entry: RouteEntry { operation, arg_names },
        });
    }

    /// The full route surface, registered once at startup.
    pub fn defaults() -> Self {
        let mut table = Self::new();

        table.register_static(Method::GET, "/currencies", Operation::ListCurrencies, &[]);
        table.register_static(Method::GET, "/currency", Operation::GetCurrency, &["code"]);
        table.register_static(Method::POST, "/currencies", Operation::AddCurrency, &["code", "name"]);
        table.register_static(Method::GET, "/exchangeRate", Operation::GetExchangeRate, &["from", "to"]);
        table.register_static(
            Method::POST,
            "/exchangeRates",
            Operation::AddExchangeRate,
            &["from", "to", "rate"],
        );
        table.register_static(Method::GET, "/exchangeRates", Operation::ListExchangeRates, &[]);
        table.register_static(Method::GET, "/convert", Operation::Convert, &["from", "to", "amount"]);
        table.register_static(
            Method::PATCH,
            "/exchangeRate",
            Operation::UpdateExchangeRate,
            &["from", "to", "rate"],
        );
        table.register_static(
            Method::POST,
            "/currencies/delete_all",
            Operation::DeleteAllCurrencies,
            &[],
        );
        table.register_static(Method::GET, "/", Operation::IndexPage, &[]);
        table.register_static(Method::GET, "/favicon.ico", Operation::Favicon, &[]);

        table.register_dynamic(Method::GET, "/currency/:code", Operation::GetCurrency, &["code"]);
        table.register_dynamic(
            Method::GET,
            "/exchangeRate/:pair",
            Operation::GetExchangeRate,
            &["from", "to"],
        );
        table.register_dynamic(
            Method::PATCH,
            "/exchangeRate/:pair",
            Operation::UpdateExchangeRate,
            &["from", "to", "rate"],
        );

        table
    }

    /// Resolve (method, path). Static routes first, then dynamic routes in
    /// registration order.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        if let Some(entry) = self.static_routes.get(&(method.clone(), path.to_string())) {
            return Some(RouteMatch {
                entry: *entry,
                path_params: HashMap::new(),
            });
        }

        for route in &self.dynamic_routes {
            if &route.method != method {
                continue;
            }
            if let Some(path_params) = match_pattern(&route.pattern, path) {
                return Some(RouteMatch {
                    entry: route.entry,
                    path_params,
                });
            }
        }

        None
    }
}

/// Match a `/`-segmented pattern against a path. `:name` segments bind the
/// corresponding path segment; literal segments must be equal.
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_parts: Vec<&str> = path.trim_matches('/').split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pattern_part, path_part) in pattern_parts.iter().zip(&path_parts) {
        if let Some(name) = pattern_part.strip_prefix(':') {
            params.insert(name.to_string(), (*path_part).to_string());
        } else if pattern_part != path_part {
            return None;
        }
    }

    Some(params)
}
