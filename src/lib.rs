//! Currency Exchange Service Library
//!
//! An HTTP currency exchange API built with Tokio and Axum: a hand-rolled
//! route table dispatches every request to a closed set of operations over
//! a SQLite-backed currency and rate store.
//!
//! ```text
//! request → http::server (catch-all handler)
//!         → routing::Dispatcher (params, pair split)
//!         → routing::RouteTable (static + dynamic lookup)
//!         → Controller → store / rates::RateResolver
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod observability;
pub mod rates;
pub mod routing;
pub mod signs;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use store::Store;
