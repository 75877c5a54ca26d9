//! Exchange rate table and conversion routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use loanfx_core::currency::{ExchangeRateTable, RateListing, convert, list_rates};
use loanfx_shared::AppError;
use loanfx_shared::types::{CurrencyCode, PageRequest, PageResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::error_response;
use crate::AppState;

/// Creates the exchange rate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exchange-rates", get(list_exchange_rates).put(replace_exchange_rates))
        .route("/convert", get(convert_amount))
}

/// Query parameters for listing rates.
#[derive(Debug, Deserialize)]
pub struct ListRatesQuery {
    /// Case-insensitive filter on currency code or name.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl ListRatesQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Response for a rate listing.
#[derive(Debug, Serialize)]
pub struct RateListResponse {
    /// Currency the listed rates are quoted against.
    pub base_code: String,
    /// When the provider last refreshed the rates (Unix seconds).
    pub time_last_update_unix: i64,
    /// One page of rates plus pagination metadata.
    #[serde(flatten)]
    pub page: PageResponse<RateListing>,
}

/// Query parameters for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
}

/// GET `/exchange-rates` - Paginated, code-ordered listing of the current table.
async fn list_exchange_rates(
    State(state): State<AppState>,
    Query(query): Query<ListRatesQuery>,
) -> impl IntoResponse {
    let Some(table) = state.rates_snapshot().await else {
        return error_response(&AppError::RatesUnavailable(
            "No exchange rate table has been loaded".to_string(),
        ));
    };

    let rows = list_rates(&table, query.search.as_deref());
    let response = RateListResponse {
        base_code: table.base_currency_code,
        time_last_update_unix: table.last_update_timestamp,
        page: query.page_request().paginate(rows),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// PUT `/exchange-rates` - Replace the current table.
async fn replace_exchange_rates(
    State(state): State<AppState>,
    Json(table): Json<ExchangeRateTable>,
) -> impl IntoResponse {
    if let Err(e) = table.validate() {
        warn!(error = %e, "Rejected exchange rate table");
        return error_response(&AppError::from(e));
    }

    let base_code = table.base_currency_code.clone();
    let count = table.len();
    state.replace_rates(table).await;

    (
        StatusCode::OK,
        Json(json!({
            "base_code": base_code,
            "currencies": count
        })),
    )
        .into_response()
}

/// GET `/convert` - Convert an amount with the current table.
///
/// Without a loaded table the conversion is the identity.
async fn convert_amount(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> impl IntoResponse {
    let codes = query
        .from
        .parse::<CurrencyCode>()
        .and_then(|from| query.to.parse::<CurrencyCode>().map(|to| (from, to)));
    let (from, to) = match codes {
        Ok(codes) => codes,
        Err(message) => return error_response(&AppError::Validation(message)),
    };

    let table = state.rates_snapshot().await;
    let result = convert(query.amount, from.as_str(), to.as_str(), table.as_ref());

    (StatusCode::OK, Json(result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header::CONTENT_TYPE};
    use http_body_util::BodyExt;
    use loanfx_core::amortization::LoanParams;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn loaded_state() -> AppState {
        let table = ExchangeRateTable::new(
            "USD",
            BTreeMap::from([
                ("USD".to_string(), dec!(1)),
                ("EUR".to_string(), dec!(0.9)),
                ("JPY".to_string(), dec!(150)),
                ("GBP".to_string(), dec!(0.8)),
            ]),
            1_767_225_600,
        );
        AppState::with_rates(LoanParams::default(), table)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn put_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_without_table_is_404() {
        let app = routes().with_state(AppState::default());
        let (status, json) = send(app, get_request("/exchange-rates")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "rates_unavailable");
    }

    #[tokio::test]
    async fn test_list_sorted_and_paginated() {
        let app = routes().with_state(loaded_state());
        let (status, json) = send(app, get_request("/exchange-rates?page=2&per_page=3")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["base_code"], "USD");
        assert_eq!(json["time_last_update_unix"], 1_767_225_600_i64);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["code"], "USD");
        assert_eq!(json["meta"]["total"], 4);
        assert_eq!(json["meta"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn test_list_search() {
        let app = routes().with_state(loaded_state());
        let (status, json) = send(app, get_request("/exchange-rates?search=pound")).await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["code"], "GBP");
        assert_eq!(data[0]["name"], "British Pound");
        assert_eq!(data[0]["rate"], "0.8");
    }

    #[tokio::test]
    async fn test_replace_then_list() {
        let state = AppState::default();
        let body = r#"{"base_code":"EUR","conversion_rates":{"EUR":"1","USD":"1.1"},"time_last_update_unix":42}"#;

        let (status, json) = send(routes().with_state(state.clone()), put_request("/exchange-rates", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["currencies"], 2);

        let (status, json) = send(routes().with_state(state), get_request("/exchange-rates")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["base_code"], "EUR");
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_replace_rejects_invalid_table() {
        let state = loaded_state();
        let body = r#"{"base_code":"USD","conversion_rates":{"USD":"1","EUR":"-2"}}"#;

        let (status, json) = send(routes().with_state(state.clone()), put_request("/exchange-rates", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");

        // previous table untouched
        let table = state.rates_snapshot().await.unwrap();
        assert_eq!(table.rate("EUR"), Some(dec!(0.9)));
    }

    #[tokio::test]
    async fn test_convert_cross_rate() {
        let app = routes().with_state(loaded_state());
        let (status, json) = send(app, get_request("/convert?amount=90&from=eur&to=JPY")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sourceCurrencyCode"], "EUR");
        assert_eq!(json["targetCurrencyCode"], "JPY");
        let converted: Decimal = json["convertedAmount"].as_str().unwrap().parse().unwrap();
        assert_eq!(converted.round_dp(6), dec!(15000));
    }

    #[tokio::test]
    async fn test_convert_without_table_is_identity() {
        let app = routes().with_state(AppState::default());
        let (status, json) = send(app, get_request("/convert?amount=500&from=USD&to=EUR")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["effectiveRate"], "1");
        assert_eq!(json["convertedAmount"], "500");
    }

    #[rstest]
    #[case("/convert?amount=1&from=US&to=EUR")]
    #[case("/convert?amount=1&from=USD&to=EURO")]
    #[case("/convert?amount=1&from=U5D&to=EUR")]
    #[tokio::test]
    async fn test_convert_rejects_bad_code(#[case] uri: &str) {
        let app = routes().with_state(loaded_state());
        let (status, json) = send(app, get_request(uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }
}
