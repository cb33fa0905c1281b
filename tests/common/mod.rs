//! Shared test helpers: spawn a server on an ephemeral port against an
//! in-memory database.

use currency_exchange::config::AppConfig;
use currency_exchange::{HttpServer, Store};
use tokio::net::TcpListener;

/// Start a server with defaults and an empty in-memory store.
/// Returns the base URL, e.g. "http://127.0.0.1:54321".
pub async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = AppConfig::default();
    config.listener.bind_address = addr.to_string();

    let store = Store::open_in_memory().unwrap();
    let server = HttpServer::new(&config, store);

    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    format!("http://{}", addr)
}
