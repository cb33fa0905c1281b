//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path, query, body)
//!     → dispatcher.rs (parse query/body, merge parameter maps)
//!     → table.rs (static lookup, then ordered dynamic scan)
//!     → controller invocation with positional arguments
//!     → Return: (payload, status) or normalized error body
//! ```
//!
//! # Design Decisions
//! - Route table built once at startup, immutable at runtime
//! - Static routes are an O(1) map; dynamic routes scan in registration
//!   order, first match wins
//! - Deterministic: same input always matches the same route

pub mod dispatcher;
pub mod table;

pub use dispatcher::Dispatcher;
pub use table::{Operation, RouteTable};
