//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Monetary values in responses are rounded to cents; the calculators
//! themselves never round.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_insurance, compute_tax, estimate_salary, find_bracket, round_currency, run_payroll,
};
use crate::error::EngineError;

use super::request::{InsuranceRequest, PayrollRunRequest, SalaryEstimateRequest, TaxRequest};
use super::response::{ApiError, ApiErrorResponse, PayrollRunResponse, TaxResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/insurance", post(insurance_handler))
        .route("/tax", post(tax_handler))
        .route("/salary/estimate", post(salary_estimate_handler))
        .route("/payroll/calculate", post(payroll_handler))
        .route("/config", get(config_handler))
        .with_state(state)
}

/// Handler for POST /insurance.
///
/// Returns the employee and employer contributions for a salary.
async fn insurance_handler(
    State(state): State<AppState>,
    payload: Result<Json<InsuranceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing insurance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let start_time = Instant::now();
    match compute_insurance(request.salary, config.insurance()) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                salary = %request.salary,
                base = %breakdown.base,
                duration_us = start_time.elapsed().as_micros(),
                "Insurance calculated"
            );
            json_response(StatusCode::OK, breakdown.rounded())
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /tax.
///
/// Returns the tax owed on a taxable income and the bracket applied.
async fn tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let tax = compute_tax(request.taxable_income, config.tax());
    let bracket = find_bracket(request.taxable_income, config.tax()).copied();

    info!(
        correlation_id = %correlation_id,
        taxable_income = %request.taxable_income,
        tax = %tax,
        "Tax calculated"
    );

    json_response(
        StatusCode::OK,
        TaxResponse {
            taxable_income: request.taxable_income,
            tax: round_currency(tax),
            bracket,
        },
    )
}

/// Handler for POST /salary/estimate.
///
/// Returns the full breakdown for a gross salary with no leave or overtime.
async fn salary_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryEstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let start_time = Instant::now();
    match estimate_salary(request.gross_salary, &config) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                gross_salary = %request.gross_salary,
                net_salary = %breakdown.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Salary estimated"
            );
            json_response(StatusCode::OK, breakdown.rounded())
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/calculate.
///
/// Computes one payroll record per selected employee for the month.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let start_time = Instant::now();
    let result = run_payroll(
        request.month,
        &request.employees,
        &request.attendance,
        &request.employee_ids,
        &config,
    );

    match result {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                month = %request.month,
                records_count = records.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculated"
            );
            json_response(
                StatusCode::OK,
                PayrollRunResponse {
                    success: true,
                    data: records.iter().map(|record| record.rounded()).collect(),
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /config.
///
/// Returns the active jurisdiction configuration.
async fn config_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_response(StatusCode::OK, config.as_ref().clone())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field path
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, JurisdictionConfig};
    use crate::models::{InsuranceBreakdown, PayrollStatus, SalaryBreakdown};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/beijing_2024").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, axum::body::Bytes) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_insurance_mid_band_salary() {
        let (status, body) = post_json("/insurance", r#"{"salary": 10000}"#).await;
        assert_eq!(status, StatusCode::OK);

        let breakdown: InsuranceBreakdown = serde_json::from_slice(&body).unwrap();
        assert_eq!(breakdown.base, dec("10000"));
        assert_eq!(breakdown.employee.social_insurance_total, dec("1050"));
        assert_eq!(breakdown.employee.housing_fund, dec("1200"));
    }

    #[tokio::test]
    async fn test_insurance_below_floor_uses_floor() {
        let (status, body) = post_json("/insurance", r#"{"salary": 3000}"#).await;
        assert_eq!(status, StatusCode::OK);

        let breakdown: InsuranceBreakdown = serde_json::from_slice(&body).unwrap();
        assert_eq!(breakdown.base, dec("3613"));
        assert_eq!(breakdown.employee.social_insurance_total, dec("379.37"));
    }

    #[tokio::test]
    async fn test_insurance_negative_salary_returns_400() {
        let (status, body) = post_json("/insurance", r#"{"salary": -1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_tax_on_threshold() {
        let (status, body) = post_json("/tax", r#"{"taxable_income": 3000}"#).await;
        assert_eq!(status, StatusCode::OK);

        let response: TaxResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.tax, dec("90"));
        assert_eq!(response.bracket.unwrap().rate, dec("0.03"));
    }

    #[tokio::test]
    async fn test_tax_negative_income_has_no_bracket() {
        let (status, body) = post_json("/tax", r#"{"taxable_income": -500}"#).await;
        assert_eq!(status, StatusCode::OK);

        let response: TaxResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.tax, Decimal::ZERO);
        assert!(response.bracket.is_none());
    }

    #[tokio::test]
    async fn test_salary_estimate() {
        let (status, body) = post_json("/salary/estimate", r#"{"gross_salary": 15000}"#).await;
        assert_eq!(status, StatusCode::OK);

        let breakdown: SalaryBreakdown = serde_json::from_slice(&body).unwrap();
        assert_eq!(breakdown.tax, dec("452.50"));
        assert_eq!(breakdown.net_salary, dec("11172.50"));
    }

    #[tokio::test]
    async fn test_salary_estimate_at_decimal_max_returns_400() {
        let body = format!(r#"{{"gross_salary": "{}"}}"#, Decimal::MAX);
        let (status, body) = post_json("/salary/estimate", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert_eq!(error.details.as_deref(), Some("base_salary"));
    }

    #[tokio::test]
    async fn test_payroll_calculate() {
        let body = r#"{
            "month": "2024-03",
            "employees": [
                { "id": "1", "name": "Zhang San", "base_salary": 15000 },
                { "id": "2", "name": "Li Si", "base_salary": 12000, "status": "inactive" }
            ],
            "attendance": { "1": { "overtime_hours": 8 } }
        }"#;

        let (status, body) = post_json("/payroll/calculate", body).await;
        assert_eq!(status, StatusCode::OK);

        let response: PayrollRunResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.success);
        assert_eq!(response.data.len(), 1);

        let record = &response.data[0];
        assert_eq!(record.employee_id, "1");
        assert_eq!(record.overtime, dec("1034.48"));
        assert_eq!(record.tax, dec("555.95"));
        assert_eq!(record.net_salary, dec("12103.53"));
        assert_eq!(record.status, PayrollStatus::Calculated);
    }

    #[tokio::test]
    async fn test_payroll_unknown_employee_returns_400() {
        let body = r#"{
            "month": "2024-03",
            "employees": [{ "id": "1", "name": "Zhang San", "base_salary": 15000 }],
            "employee_ids": ["99"]
        }"#;

        let (status, body) = post_json("/payroll/calculate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = post_json("/tax", "{invalid json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let (status, body) = post_json("/salary/estimate", r#"{"salary": 15000}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("gross_salary"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tax")
                    .body(Body::from(r#"{"taxable_income": 100}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_get_config() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["metadata"]["code"], "CN-BJ");
        assert_eq!(json["tax"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_replaced_config_applies_to_next_request() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let original: JurisdictionConfig = state.config().as_ref().clone();
        let mut policy = *original.policy();
        policy.personal_deduction = dec("6000");
        let updated = JurisdictionConfig::new(
            original.metadata().clone(),
            *original.insurance(),
            original.tax().clone(),
            policy,
        )
        .unwrap();
        state.replace_config(updated);

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/salary/estimate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"gross_salary": 15000}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let breakdown: SalaryBreakdown = serde_json::from_slice(&body).unwrap();
        assert_eq!(breakdown.taxable_income, dec("5625"));
    }
}
