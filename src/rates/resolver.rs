//! Rate resolution: direct lookup, inverse lookup, triangulation through
//! the configured base currency.

use serde::Serialize;

use crate::error::ApiError;
use crate::store::{Currency, Store};

/// How the applicable rate was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMethod {
    Direct,
    Reverse,
    ViaBase,
}

/// Result of a conversion query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub base_currency: Currency,
    pub target_currency: Currency,
    pub rate: f64,
    pub amount: f64,
    pub converted_amount: f64,
    pub method: RateMethod,
}

pub struct RateResolver {
    base: String,
}

impl RateResolver {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base: base_currency.into().to_ascii_uppercase(),
        }
    }

    /// Resolve the applicable rate for (from, to) and convert `amount`.
    ///
    /// Precedence, first match authoritative: stored from→to rate, then the
    /// reciprocal of a stored to→from rate, then `rate(base→to) /
    /// rate(base→from)`. Amounts are rounded to 2 decimals; the rate is
    /// reported as derived.
    pub fn resolve(
        &self,
        store: &Store,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<Conversion, ApiError> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();

        let (base_currency, target_currency) =
            match (store.find_currency(&from)?, store.find_currency(&to)?) {
                (Some(f), Some(t)) => (f, t),
                (f, t) => {
                    let mut missing = Vec::new();
                    if f.is_none() {
                        missing.push(from.clone());
                    }
                    if t.is_none() {
                        missing.push(to.clone());
                    }
                    return Err(ApiError::CurrencyNotFound(missing));
                }
            };

        let (rate, method) = self.lookup_rate(store, &from, &to)?;
        tracing::debug!(from = %from, to = %to, rate, method = ?method, "rate resolved");

        Ok(Conversion {
            base_currency,
            target_currency,
            rate,
            amount: round2(amount),
            converted_amount: round2(rate * amount),
            method,
        })
    }

    fn lookup_rate(
        &self,
        store: &Store,
        from: &str,
        to: &str,
    ) -> Result<(f64, RateMethod), ApiError> {
        if let Some(rate) = store.find_rate(from, to)? {
            return Ok((rate, RateMethod::Direct));
        }
        if let Some(rate) = store.find_rate(to, from)? {
            return Ok((1.0 / rate, RateMethod::Reverse));
        }
        if let (Some(base_to_from), Some(base_to_to)) =
            (store.find_rate(&self.base, from)?, store.find_rate(&self.base, to)?)
        {
            return Ok((base_to_to / base_to_from, RateMethod::ViaBase));
        }
        Err(ApiError::ExchangeRateNotFound(
            from.to_string(),
            to.to_string(),
        ))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
