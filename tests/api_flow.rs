//! End-to-end tests over a spawned server: currency registration, rate
//! management, conversion paths and error responses.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

async fn add_currency(client: &reqwest::Client, base: &str, code: &str) {
    let res = client
        .post(format!("{base}/currencies"))
        .json(&json!({ "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), StatusCode::CREATED.as_u16());
}

async fn add_rate(client: &reqwest::Client, base: &str, from: &str, to: &str, rate: f64) {
    let res = client
        .post(format!("{base}/exchangeRates"))
        .form(&[("from", from), ("to", to), ("rate", &rate.to_string())])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), StatusCode::CREATED.as_u16());
}

#[tokio::test]
async fn currency_lifecycle() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    // Codes are canonicalized to upper case, sign comes from the catalog
    let res = client
        .post(format!("{base}/currencies"))
        .json(&json!({ "code": "usd", "name": "US Dollar" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "USD");
    assert_eq!(body["name"], "US Dollar");
    assert_eq!(body["sign"], "$");
    assert_eq!(body["id"], 1);

    let res = client
        .get(format!("{base}/currency/USD"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, body);

    // Duplicate registration
    let res = client
        .post(format!("{base}/currencies"))
        .json(&json!({ "code": "USD" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 409);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Currency 'USD' already exists");

    // Code outside the built-in catalog
    let res = client
        .post(format!("{base}/currencies"))
        .json(&json!({ "code": "ZZZ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Unknown currency code: ZZZ");

    let res = client
        .get(format!("{base}/currency/GBP"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Currency 'GBP' not found");
}

#[tokio::test]
async fn exchange_rate_lifecycle() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    add_currency(&client, &base, "USD").await;
    add_currency(&client, &base, "EUR").await;

    let res = client
        .post(format!("{base}/exchangeRates"))
        .form(&[("from", "usd"), ("to", "eur"), ("rate", "0.9")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);
    let view: Value = res.json().await.unwrap();
    assert_eq!(view["baseCurrency"]["code"], "USD");
    assert_eq!(view["targetCurrency"]["code"], "EUR");
    assert_eq!(view["rate"], 0.9);

    // Pair path form
    let res = client
        .get(format!("{base}/exchangeRate/USDEUR"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["rate"], 0.9);

    // Pair must be exactly six characters
    let res = client
        .get(format!("{base}/exchangeRate/USD"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Invalid pair format");

    // Update through the pair route
    let res = client
        .patch(format!("{base}/exchangeRate/USDEUR"))
        .form(&[("rate", "0.95")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["rate"], 0.95);

    // Duplicate pair
    let res = client
        .post(format!("{base}/exchangeRates"))
        .form(&[("from", "USD"), ("to", "EUR"), ("rate", "1.0")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 409);

    // Rate over currencies that are not registered
    let res = client
        .post(format!("{base}/exchangeRates"))
        .form(&[("from", "GBP"), ("to", "JPY"), ("rate", "1.0")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Currencies not found: 'GBP', 'JPY'");

    // Update of an absent pair
    let res = client
        .patch(format!("{base}/exchangeRate/EURUSD"))
        .form(&[("rate", "1.1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Exchange rate EUR -> USD not found");

    let res = client
        .get(format!("{base}/exchangeRates"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let list: Value = res.json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn conversion_paths() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    add_currency(&client, &base, "USD").await;
    add_currency(&client, &base, "EUR").await;
    add_currency(&client, &base, "JPY").await;
    add_rate(&client, &base, "USD", "EUR", 0.9).await;
    add_rate(&client, &base, "USD", "JPY", 150.0).await;

    // Direct
    let res = client
        .get(format!("{base}/convert?from=USD&to=EUR&amount=100"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "direct");
    assert_eq!(body["rate"], 0.9);
    assert_eq!(body["amount"], 100.0);
    assert_eq!(body["convertedAmount"], 90.0);
    assert_eq!(body["baseCurrency"]["code"], "USD");
    assert_eq!(body["targetCurrency"]["code"], "EUR");

    // Reverse (reciprocal of the stored USD -> EUR rate)
    let res = client
        .get(format!("{base}/convert?from=EUR&to=USD&amount=9"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "reverse");
    assert_eq!(body["convertedAmount"], 10.0);

    // Triangulated through the base currency
    let res = client
        .get(format!("{base}/convert?from=EUR&to=JPY&amount=3"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "via_base");
    assert!((body["rate"].as_f64().unwrap() - 150.0 / 0.9).abs() < 1e-9);
    assert_eq!(body["convertedAmount"], 500.0);

    // Unparseable amount
    let res = client
        .get(format!("{base}/convert?from=USD&to=EUR&amount=ten"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Invalid amount format");

    // Missing amount
    let res = client
        .get(format!("{base}/convert?from=USD&to=EUR"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Missing required form field");
}

#[tokio::test]
async fn parameter_sources_merge_with_body_over_query() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    add_currency(&client, &base, "USD").await;
    add_currency(&client, &base, "EUR").await;

    // code=EUR in the query is overridden by code=USD in the JSON body
    let res = client
        .get(format!("{base}/currency?code=EUR"))
        .json(&json!({ "code": "USD" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "USD");
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{base}/nope/deep/path"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "Route not found");

    // Known path, wrong method
    let res = client
        .delete(format!("{base}/currencies"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_all_resets_ids() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    add_currency(&client, &base, "USD").await;
    add_currency(&client, &base, "EUR").await;
    add_rate(&client, &base, "USD", "EUR", 0.9).await;

    let res = client
        .post(format!("{base}/currencies/delete_all"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "All currencies and exchange rates deleted, ids reset"
    );

    let res = client
        .get(format!("{base}/currencies"))
        .send()
        .await
        .unwrap();
    let list: Value = res.json().await.unwrap();
    assert!(list.as_array().unwrap().is_empty());

    // Ids restart from 1 after the reset
    let res = client
        .post(format!("{base}/currencies"))
        .json(&json!({ "code": "JPY" }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn static_pages_are_served() {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let content_type = res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(res.text().await.unwrap().contains("Currency Exchange"));

    let res = client
        .get(format!("{base}/favicon.ico"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers().get("content-type").unwrap(), "image/x-icon");
}
