//! Currency store backed by SQLite.
//!
//! # Data Flow
//! ```text
//! Handler call (code / pair / rate)
//!     → upper-case canonicalization at this boundary
//!     → single prepared statement against the connection
//!     → row mapped into Currency / ExchangeRateView
//! ```
//!
//! # Design Decisions
//! - Synchronous blocking calls behind a `Mutex<Connection>`; one statement
//!   per operation, no cross-request locking
//! - Uniqueness violations become AlreadyExists domain errors at the call
//!   that hit them
//! - Schema created on open, idempotently

mod currencies;
mod exchange_rates;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;

use crate::error::ApiError;

/// A registered currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub sign: String,
}

/// Exchange-rate row joined with both currency records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateView {
    pub id: i64,
    pub base_currency: Currency,
    pub target_currency: Currency,
    pub rate: f64,
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, ApiError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, ApiError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.conn.lock().map_err(|_| ApiError::Internal)
    }
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS currencies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL,
            sign TEXT
        );
        CREATE TABLE IF NOT EXISTS exchange_rates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            from_currency TEXT NOT NULL,
            to_currency TEXT NOT NULL,
            rate REAL NOT NULL,
            UNIQUE(from_currency, to_currency),
            FOREIGN KEY(from_currency) REFERENCES currencies(code) ON DELETE CASCADE,
            FOREIGN KEY(to_currency) REFERENCES currencies(code) ON DELETE CASCADE
        );",
    )
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
