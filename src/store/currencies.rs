//! Currency table operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{is_unique_violation, Currency, Store};
use crate::error::ApiError;

fn currency_from_row(row: &Row<'_>) -> rusqlite::Result<Currency> {
    Ok(Currency {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        sign: row.get(3)?,
    })
}

impl Store {
    pub fn find_currency(&self, code: &str) -> Result<Option<Currency>, ApiError> {
        let code = code.to_ascii_uppercase();
        let conn = self.conn()?;
        let currency = conn
            .query_row(
                "SELECT id, code, name, sign FROM currencies WHERE code = ?1",
                params![code],
                currency_from_row,
            )
            .optional()?;
        Ok(currency)
    }

    pub fn list_currencies(&self) -> Result<Vec<Currency>, ApiError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, code, name, sign FROM currencies ORDER BY id")?;
        let rows = stmt.query_map([], currency_from_row)?;
        let currencies = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(currencies)
    }

    pub fn insert_currency(&self, code: &str, name: &str, sign: &str) -> Result<Currency, ApiError> {
        let code = code.to_ascii_uppercase();
        let conn = self.conn()?;
        match conn.execute(
            "INSERT INTO currencies (code, name, sign) VALUES (?1, ?2, ?3)",
            params![code, name, sign],
        ) {
            Ok(_) => Ok(Currency {
                id: conn.last_insert_rowid(),
                code,
                name: name.to_string(),
                sign: sign.to_string(),
            }),
            Err(err) if is_unique_violation(&err) => Err(ApiError::CurrencyAlreadyExists(code)),
            Err(err) => Err(err.into()),
        }
    }

    /// Bulk reset: wipes both tables and restarts id assignment from 1.
    pub fn delete_all(&self) -> Result<(), ApiError> {
        let conn = self.conn()?;
        conn.execute_batch("DELETE FROM exchange_rates; DELETE FROM currencies;")?;
        // sqlite_sequence only exists after the first AUTOINCREMENT insert
        let _ = conn.execute_batch(
            "DELETE FROM sqlite_sequence WHERE name IN ('currencies', 'exchange_rates');",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_find_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let inserted = store
            .insert_currency("USD", "United States Dollar", "$")
            .unwrap();
        assert_eq!(inserted.id, 1);

        let found = store.find_currency("USD").unwrap().unwrap();
        assert_eq!(found, inserted);
    }

    #[test]
    fn codes_are_stored_upper_case() {
        let store = Store::open_in_memory().unwrap();
        store.insert_currency("usd", "United States Dollar", "$").unwrap();

        let found = store.find_currency("usd").unwrap().unwrap();
        assert_eq!(found.code, "USD");
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        store.insert_currency("USD", "United States Dollar", "$").unwrap();

        let err = store
            .insert_currency("usd", "Dollar again", "$")
            .unwrap_err();
        assert!(matches!(err, ApiError::CurrencyAlreadyExists(code) if code == "USD"));
    }

    #[test]
    fn delete_all_resets_ids() {
        let store = Store::open_in_memory().unwrap();
        store.insert_currency("USD", "United States Dollar", "$").unwrap();
        store.insert_currency("EUR", "Euro", "\u{20ac}").unwrap();

        store.delete_all().unwrap();
        assert!(store.list_currencies().unwrap().is_empty());

        let fresh = store.insert_currency("EUR", "Euro", "\u{20ac}").unwrap();
        assert_eq!(fresh.id, 1);
    }
}
