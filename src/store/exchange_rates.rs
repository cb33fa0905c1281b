//! Exchange-rate table operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{is_unique_violation, Currency, ExchangeRateView, Store};
use crate::error::ApiError;

const VIEW_QUERY: &str = "SELECT
        er.id,
        base.id, base.code, base.name, base.sign,
        target.id, target.code, target.name, target.sign,
        er.rate
    FROM exchange_rates er
    JOIN currencies base ON er.from_currency = base.code
    JOIN currencies target ON er.to_currency = target.code";

fn view_from_row(row: &Row<'_>) -> rusqlite::Result<ExchangeRateView> {
    Ok(ExchangeRateView {
        id: row.get(0)?,
        base_currency: Currency {
            id: row.get(1)?,
            code: row.get(2)?,
            name: row.get(3)?,
            sign: row.get(4)?,
        },
        target_currency: Currency {
            id: row.get(5)?,
            code: row.get(6)?,
            name: row.get(7)?,
            sign: row.get(8)?,
        },
        rate: row.get(9)?,
    })
}

impl Store {
    /// Stored rate for the exact (from, to) pair, if any.
    pub fn find_rate(&self, from: &str, to: &str) -> Result<Option<f64>, ApiError> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();
        let conn = self.conn()?;
        let rate = conn
            .query_row(
                "SELECT rate FROM exchange_rates WHERE from_currency = ?1 AND to_currency = ?2",
                params![from, to],
                |row| row.get(0),
            )
            .optional()?;
        Ok(rate)
    }

    /// Joined view for the exact (from, to) pair, if any.
    pub fn rate_view(&self, from: &str, to: &str) -> Result<Option<ExchangeRateView>, ApiError> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();
        let conn = self.conn()?;
        let query = format!("{VIEW_QUERY} WHERE er.from_currency = ?1 AND er.to_currency = ?2");
        let view = conn
            .query_row(&query, params![from, to], view_from_row)
            .optional()?;
        Ok(view)
    }

    pub fn list_rate_views(&self) -> Result<Vec<ExchangeRateView>, ApiError> {
        let conn = self.conn()?;
        let query = format!("{VIEW_QUERY} ORDER BY er.id");
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([], view_from_row)?;
        let views = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(views)
    }

    /// Insert a new rate row. Both codes must reference existing currencies.
    pub fn insert_rate(&self, from: &str, to: &str, rate: f64) -> Result<ExchangeRateView, ApiError> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();

        let mut missing = Vec::new();
        if self.find_currency(&from)?.is_none() {
            missing.push(from.clone());
        }
        if self.find_currency(&to)?.is_none() {
            missing.push(to.clone());
        }
        if !missing.is_empty() {
            return Err(ApiError::CurrencyNotFound(missing));
        }

        {
            let conn = self.conn()?;
            match conn.execute(
                "INSERT INTO exchange_rates (from_currency, to_currency, rate) VALUES (?1, ?2, ?3)",
                params![from, to, rate],
            ) {
                Ok(_) => {}
                Err(err) if is_unique_violation(&err) => {
                    return Err(ApiError::ExchangeRateAlreadyExists(from, to));
                }
                Err(err) => return Err(err.into()),
            }
        }

        self.rate_view(&from, &to)?.ok_or(ApiError::Internal)
    }

    /// Replace the rate of an existing pair.
    pub fn update_rate(&self, from: &str, to: &str, rate: f64) -> Result<ExchangeRateView, ApiError> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();

        {
            let conn = self.conn()?;
            let updated = conn.execute(
                "UPDATE exchange_rates SET rate = ?1 WHERE from_currency = ?2 AND to_currency = ?3",
                params![rate, from, to],
            )?;
            if updated == 0 {
                return Err(ApiError::ExchangeRateNotFound(from, to));
            }
        }

        self.rate_view(&from, &to)?.ok_or(ApiError::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.insert_currency("USD", "United States Dollar", "$").unwrap();
        store.insert_currency("EUR", "Euro", "\u{20ac}").unwrap();
        store
    }

    #[test]
    fn insert_returns_joined_view() {
        let store = seeded_store();
        let view = store.insert_rate("usd", "eur", 0.9).unwrap();

        assert_eq!(view.base_currency.code, "USD");
        assert_eq!(view.target_currency.code, "EUR");
        assert_eq!(view.target_currency.sign, "\u{20ac}");
        assert_eq!(view.rate, 0.9);
    }

    #[test]
    fn rates_are_directional() {
        let store = seeded_store();
        store.insert_rate("USD", "EUR", 0.9).unwrap();

        assert!(store.find_rate("USD", "EUR").unwrap().is_some());
        assert!(store.find_rate("EUR", "USD").unwrap().is_none());
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let store = seeded_store();
        store.insert_rate("USD", "EUR", 0.9).unwrap();

        let err = store.insert_rate("USD", "EUR", 0.95).unwrap_err();
        assert!(matches!(
            err,
            ApiError::ExchangeRateAlreadyExists(from, to) if from == "USD" && to == "EUR"
        ));
    }

    #[test]
    fn insert_requires_existing_currencies() {
        let store = seeded_store();
        let err = store.insert_rate("USD", "JPY", 150.0).unwrap_err();
        assert!(matches!(
            err,
            ApiError::CurrencyNotFound(codes) if codes == vec!["JPY".to_string()]
        ));

        let err = store.insert_rate("GBP", "JPY", 1.0).unwrap_err();
        assert!(matches!(
            err,
            ApiError::CurrencyNotFound(codes)
                if codes == vec!["GBP".to_string(), "JPY".to_string()]
        ));
    }

    #[test]
    fn update_missing_pair_is_not_found() {
        let store = seeded_store();
        let err = store.update_rate("USD", "EUR", 0.95).unwrap_err();
        assert!(matches!(err, ApiError::ExchangeRateNotFound(_, _)));
    }

    #[test]
    fn update_replaces_rate() {
        let store = seeded_store();
        store.insert_rate("USD", "EUR", 0.9).unwrap();

        let view = store.update_rate("usd", "eur", 0.95).unwrap();
        assert_eq!(view.rate, 0.95);
        assert_eq!(store.find_rate("USD", "EUR").unwrap(), Some(0.95));
    }
}
