//! Loan calculation routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use loanfx_core::amortization::{
    LoanParams, LoanSummary, PaymentFrequency, calculate_loan_or_default,
};
use loanfx_core::format::{format_currency, format_date, format_percentage};
use loanfx_shared::AppError;
use loanfx_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::AppState;

/// Creates the loan routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/loans/defaults", get(loan_defaults))
        .route("/loans/calculate", post(calculate))
        .route("/loans/summary", post(summary))
}

/// Request body for a loan calculation. Omitted fields take the configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Amount borrowed.
    pub principal: Option<Decimal>,
    /// Annual interest rate in percent.
    pub annual_interest_rate: Option<Decimal>,
    /// Loan term in years.
    pub term_years: Option<Decimal>,
    /// Payment frequency.
    pub payment_frequency: Option<PaymentFrequency>,
    /// Date payments are counted from (defaults to today, UTC).
    pub anchor_date: Option<NaiveDate>,
}

impl LoanRequest {
    fn params(&self, defaults: &LoanParams) -> LoanParams {
        LoanParams::new(
            self.principal.unwrap_or(defaults.principal),
            self.annual_interest_rate
                .unwrap_or(defaults.annual_interest_rate),
            self.term_years.unwrap_or(defaults.term_years),
            self.payment_frequency.unwrap_or(defaults.payment_frequency),
        )
    }

    fn anchor_date(&self) -> NaiveDate {
        self.anchor_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Currency the amounts are displayed in (defaults to USD).
    pub currency: Option<String>,
}

/// Display strings for a loan summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    /// Installment, e.g. `$659.96`.
    pub installment_amount: String,
    /// Total of all installments.
    pub total_payment_amount: String,
    /// Total interest.
    pub total_interest_amount: String,
    /// Interest share, e.g. `36.86%`.
    pub interest_share: String,
    /// Due date of the first installment.
    pub first_payment_date: Option<String>,
    /// Due date of the last installment.
    pub last_payment_date: Option<String>,
}

/// Response for the summary endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Display currency.
    pub currency: String,
    /// Raw figures.
    pub summary: LoanSummary,
    /// Figures formatted for display.
    pub formatted: FormattedSummary,
    /// Why the calculation was rejected, if it was.
    pub error: Option<String>,
}

/// GET `/loans/defaults` - Parameters applied to omitted request fields.
async fn loan_defaults(State(state): State<AppState>) -> Json<LoanParams> {
    Json(state.loan_defaults)
}

/// POST `/loans/calculate` - Installment, totals and full schedule.
///
/// Always 200: a rejected calculation carries the zero result and an `error` message.
async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<LoanRequest>,
) -> impl IntoResponse {
    let params = payload.params(&state.loan_defaults);
    let outcome = calculate_loan_or_default(&params, payload.anchor_date());
    (StatusCode::OK, Json(outcome))
}

/// POST `/loans/summary` - Totals only, formatted for display.
async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
    Json(payload): Json<LoanRequest>,
) -> impl IntoResponse {
    let currency = match query.currency.as_deref().unwrap_or("USD").parse::<CurrencyCode>() {
        Ok(code) => code,
        Err(message) => return error_response(&AppError::Validation(message)),
    };

    let params = payload.params(&state.loan_defaults);
    let outcome = calculate_loan_or_default(&params, payload.anchor_date());
    let summary = outcome.result.summary();
    let schedule = &outcome.result.amortization_schedule;

    let formatted = FormattedSummary {
        installment_amount: format_currency(summary.installment_amount, currency.as_str()),
        total_payment_amount: format_currency(summary.total_payment_amount, currency.as_str()),
        total_interest_amount: format_currency(summary.total_interest_amount, currency.as_str()),
        interest_share: format_percentage(summary.interest_share_percent),
        first_payment_date: schedule.first().map(|e| format_date(e.payment_date)),
        last_payment_date: schedule.last().map(|e| format_date(e.payment_date)),
    };

    (
        StatusCode::OK,
        Json(SummaryResponse {
            currency: currency.to_string(),
            summary,
            formatted,
            error: outcome.error,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header::CONTENT_TYPE};
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        routes().with_state(AppState::default())
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_schedule() {
        let (status, json) = post_json(
            app(),
            "/loans/calculate",
            r#"{"principal":"100000","annualInterestRate":"5","termYears":"20","paymentFrequency":"monthly","anchorDate":"2026-01-31"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["error"].is_null());
        let result = &json["result"];
        assert_eq!(decimal(&result["installmentAmount"]).round_dp(2), dec!(659.96));
        let schedule = result["amortizationSchedule"].as_array().unwrap();
        assert_eq!(schedule.len(), 240);
        assert_eq!(schedule[0]["paymentIndex"], 1);
        assert_eq!(schedule[0]["paymentDate"], "2026-02-28");
        assert_eq!(decimal(&schedule[239]["endingBalance"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_calculate_fills_omitted_fields_from_defaults() {
        let defaults = LoanParams::new(dec!(12000), dec!(0), dec!(1), PaymentFrequency::Monthly);
        let app = routes().with_state(AppState::new(defaults));

        let (status, json) =
            post_json(app, "/loans/calculate", r#"{"anchorDate":"2026-01-15"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&json["result"]["installmentAmount"]), dec!(1000));
        assert_eq!(decimal(&json["result"]["totalInterestAmount"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_calculate_rejected_input_is_still_ok() {
        let (status, json) = post_json(
            app(),
            "/loans/calculate",
            r#"{"principal":"0","annualInterestRate":"5","termYears":"20"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["error"], "Principal amount must be greater than zero");
        assert_eq!(decimal(&json["result"]["installmentAmount"]), Decimal::ZERO);
        assert!(json["result"]["amortizationSchedule"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_formats_in_currency() {
        let (status, json) = post_json(
            app(),
            "/loans/summary?currency=eur",
            r#"{"principal":"12000","annualInterestRate":"0","termYears":"1","anchorDate":"2026-01-31"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["summary"]["paymentCount"], 12);
        assert_eq!(json["formatted"]["installmentAmount"], "€1,000.00");
        assert_eq!(json["formatted"]["totalPaymentAmount"], "€12,000.00");
        assert_eq!(json["formatted"]["interestShare"], "0.00%");
        assert_eq!(json["formatted"]["firstPaymentDate"], "Feb 28, 2026");
        assert_eq!(json["formatted"]["lastPaymentDate"], "Jan 31, 2027");
    }

    #[tokio::test]
    async fn test_summary_rejects_bad_currency() {
        let (status, json) = post_json(app(), "/loans/summary?currency=dollars", "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_defaults_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/loans/defaults").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let params: LoanParams = serde_json::from_slice(&body).unwrap();
        assert_eq!(params, LoanParams::default());
    }
}
