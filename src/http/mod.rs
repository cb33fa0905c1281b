//! HTTP layer: server wiring and response payloads.

pub mod response;
pub mod server;

pub use server::HttpServer;
