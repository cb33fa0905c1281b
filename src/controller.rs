//! Thin business handlers over the store and resolver.
//!
//! Field-presence and number-format validation happens here; everything
//! heavier lives in the store and the rate resolver.

use std::fs;
use std::path::PathBuf;

use axum::http::StatusCode;
use serde_json::json;

use crate::error::ApiError;
use crate::http::response::Payload;
use crate::rates::RateResolver;
use crate::routing::Operation;
use crate::signs;
use crate::store::Store;

type HandlerResult = Result<(Payload, StatusCode), ApiError>;

pub struct Controller {
    store: Store,
    resolver: RateResolver,
    assets_dir: PathBuf,
}

impl Controller {
    pub fn new(store: Store, resolver: RateResolver, assets_dir: PathBuf) -> Self {
        Self {
            store,
            resolver,
            assets_dir,
        }
    }

    /// Invoke an operation with its positional arguments, in the order the
    /// route table declared them.
    pub fn invoke(&self, operation: Operation, args: &[Option<String>]) -> HandlerResult {
        match operation {
            Operation::ListCurrencies => self.list_currencies(),
            Operation::GetCurrency => self.get_currency(arg(args, 0)),
            Operation::AddCurrency => self.add_currency(arg(args, 0), arg(args, 1)),
            Operation::GetExchangeRate => self.get_exchange_rate(arg(args, 0), arg(args, 1)),
            Operation::AddExchangeRate => {
                self.add_exchange_rate(arg(args, 0), arg(args, 1), arg(args, 2))
            }
            Operation::UpdateExchangeRate => {
                self.update_exchange_rate(arg(args, 0), arg(args, 1), arg(args, 2))
            }
            Operation::ListExchangeRates => self.list_exchange_rates(),
            Operation::Convert => self.convert(arg(args, 0), arg(args, 1), arg(args, 2)),
            Operation::DeleteAllCurrencies => self.delete_all_currencies(),
            Operation::IndexPage => self.index_page(),
            Operation::Favicon => self.favicon(),
        }
    }

    fn list_currencies(&self) -> HandlerResult {
        let currencies = self.store.list_currencies()?;
        Ok((Payload::json(&currencies)?, StatusCode::OK))
    }

    fn get_currency(&self, code: Option<&str>) -> HandlerResult {
        let code = required(code)?.to_ascii_uppercase();
        let currency = self
            .store
            .find_currency(&code)?
            .ok_or_else(|| ApiError::CurrencyNotFound(vec![code]))?;
        Ok((Payload::json(&currency)?, StatusCode::OK))
    }

    fn add_currency(&self, code: Option<&str>, name: Option<&str>) -> HandlerResult {
        let code = required(code)?.to_ascii_uppercase();
        let (catalog_name, sign) =
            signs::lookup(&code).ok_or_else(|| ApiError::UnknownCurrencyCode(code.clone()))?;
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => catalog_name,
        };

        let currency = self.store.insert_currency(&code, name, sign)?;
        tracing::info!(code = %currency.code, "currency added");
        Ok((Payload::json(&currency)?, StatusCode::CREATED))
    }

    fn get_exchange_rate(&self, from: Option<&str>, to: Option<&str>) -> HandlerResult {
        let from = required(from)?.to_ascii_uppercase();
        let to = required(to)?.to_ascii_uppercase();
        let view = self
            .store
            .rate_view(&from, &to)?
            .ok_or(ApiError::ExchangeRateNotFound(from, to))?;
        Ok((Payload::json(&view)?, StatusCode::OK))
    }

    fn add_exchange_rate(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        rate: Option<&str>,
    ) -> HandlerResult {
        let from = required(from)?;
        let to = required(to)?;
        let rate = parse_rate(rate)?;

        let view = self.store.insert_rate(from, to, rate)?;
        tracing::info!(from = %view.base_currency.code, to = %view.target_currency.code, rate, "exchange rate added");
        Ok((Payload::json(&view)?, StatusCode::CREATED))
    }

    fn update_exchange_rate(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        rate: Option<&str>,
    ) -> HandlerResult {
        let from = required(from)?;
        let to = required(to)?;
        let rate = parse_rate(rate)?;

        let view = self.store.update_rate(from, to, rate)?;
        Ok((Payload::json(&view)?, StatusCode::OK))
    }

    fn list_exchange_rates(&self) -> HandlerResult {
        let views = self.store.list_rate_views()?;
        Ok((Payload::json(&views)?, StatusCode::OK))
    }

    fn convert(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        amount: Option<&str>,
    ) -> HandlerResult {
        let from = required(from)?;
        let to = required(to)?;
        let amount = parse_amount(amount)?;

        let conversion = self.resolver.resolve(&self.store, from, to, amount)?;
        Ok((Payload::json(&conversion)?, StatusCode::OK))
    }

    fn delete_all_currencies(&self) -> HandlerResult {
        self.store.delete_all()?;
        tracing::info!("all currencies and exchange rates deleted");
        Ok((
            Payload::Json(json!({
                "message": "All currencies and exchange rates deleted, ids reset"
            })),
            StatusCode::OK,
        ))
    }

    fn index_page(&self) -> HandlerResult {
        let markup = fs::read_to_string(self.assets_dir.join("index.html"))?;
        Ok((Payload::Html(markup), StatusCode::OK))
    }

    fn favicon(&self) -> HandlerResult {
        let bytes = fs::read(self.assets_dir.join("favicon.ico"))?;
        Ok((Payload::Binary(bytes), StatusCode::OK))
    }
}

fn arg<'a>(args: &'a [Option<String>], index: usize) -> Option<&'a str> {
    args.get(index).and_then(|value| value.as_deref())
}

fn required(value: Option<&str>) -> Result<&str, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::MissingRequiredField),
    }
}

/// Rates must parse to a positive finite number.
fn parse_rate(raw: Option<&str>) -> Result<f64, ApiError> {
    let raw = required(raw)?;
    let rate: f64 = raw.parse().map_err(|_| ApiError::InvalidAmountFormat)?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ApiError::InvalidAmountFormat);
    }
    Ok(rate)
}

fn parse_amount(raw: Option<&str>) -> Result<f64, ApiError> {
    let raw = required(raw)?;
    let amount: f64 = raw.parse().map_err(|_| ApiError::InvalidAmountFormat)?;
    if !amount.is_finite() {
        return Err(ApiError::InvalidAmountFormat);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateResolver;

    fn controller() -> Controller {
        Controller::new(
            Store::open_in_memory().unwrap(),
            RateResolver::new("USD"),
            "assets".into(),
        )
    }

    #[test]
    fn add_currency_uses_catalog_sign_and_name_fallback() {
        let c = controller();

        let (payload, status) = c.add_currency(Some("eur"), None).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let Payload::Json(body) = payload else {
            panic!("expected JSON");
        };
        assert_eq!(body["code"], "EUR");
        assert_eq!(body["name"], "Euro");
        assert_eq!(body["sign"], "\u{20ac}");
    }

    #[test]
    fn add_currency_rejects_unknown_code() {
        let c = controller();
        let err = c.add_currency(Some("ZZZ"), Some("Zed")).unwrap_err();
        assert!(matches!(err, ApiError::UnknownCurrencyCode(code) if code == "ZZZ"));
    }

    #[test]
    fn rate_must_be_positive_number() {
        assert!(matches!(
            parse_rate(Some("abc")),
            Err(ApiError::InvalidAmountFormat)
        ));
        assert!(matches!(
            parse_rate(Some("-1.5")),
            Err(ApiError::InvalidAmountFormat)
        ));
        assert!(matches!(
            parse_rate(Some("0")),
            Err(ApiError::InvalidAmountFormat)
        ));
        assert!(matches!(parse_rate(None), Err(ApiError::MissingRequiredField)));
        assert_eq!(parse_rate(Some("0.9")).unwrap(), 0.9);
    }

    #[test]
    fn amount_accepts_any_finite_number() {
        assert_eq!(parse_amount(Some("0")).unwrap(), 0.0);
        assert_eq!(parse_amount(Some("-3.5")).unwrap(), -3.5);
        assert!(matches!(
            parse_amount(Some("ten")),
            Err(ApiError::InvalidAmountFormat)
        ));
        assert!(matches!(
            parse_amount(Some("")),
            Err(ApiError::MissingRequiredField)
        ));
    }

    #[test]
    fn missing_required_args_are_rejected() {
        let c = controller();
        assert!(matches!(
            c.get_currency(None).unwrap_err(),
            ApiError::MissingRequiredField
        ));
        assert!(matches!(
            c.get_exchange_rate(Some("USD"), None).unwrap_err(),
            ApiError::MissingRequiredField
        ));
    }
}
