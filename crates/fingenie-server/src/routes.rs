//! Finance endpoints
//!
//! Every success body is `{"message": ..., "data": ...}`, with the engine's
//! warnings attached when there are any.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::json;

use fingenie_core::affordability::{self, AffordabilityInput, AffordabilityOutput};
use fingenie_core::loans::comparison::{self, LoanComparisonInput, LoanComparisonOutput};
use fingenie_core::loans::interest_only::{self, InterestOnlyOutput};
use fingenie_core::loans::prepayment::{self, PrepaymentInput, PrepaymentOutput};
use fingenie_core::loans::presets::LoanPreset;
use fingenie_core::loans::{self, EmiOutput, LoanParameters};
use fingenie_core::ComputationOutput;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(message: &'static str, data: T) -> Self {
        Self {
            message,
            data,
            warnings: Vec::new(),
        }
    }

    fn from_output(message: &'static str, output: ComputationOutput<T>) -> Self {
        Self {
            message,
            data: output.result,
            warnings: output.warnings,
        }
    }
}

pub async fn calculate_emi(payload: Result<Json<LoanParameters>, JsonRejection>) -> ApiResult<EmiOutput> {
    let Json(params) = payload?;
    let output = loans::calculate_emi(&params)?;

    tracing::info!(
        principal = %params.principal,
        annual_rate = %params.annual_rate,
        tenure_months = params.tenure_months,
        emi = %output.result.emi,
        "EMI calculated"
    );
    Ok(Json(ApiResponse::from_output("EMI calculated successfully", output)))
}

pub async fn calculate_prepayment(
    payload: Result<Json<PrepaymentInput>, JsonRejection>,
) -> ApiResult<PrepaymentOutput> {
    let Json(input) = payload?;
    let output = prepayment::calculate_prepayment(&input)?;

    tracing::info!(
        strategy = ?input.strategy,
        prepayment_month = input.prepayment_month,
        interest_saved = %output.result.interest_saved,
        months_reduced = output.result.months_reduced,
        "Prepayment savings calculated"
    );
    Ok(Json(ApiResponse::from_output(
        "Prepayment savings calculated successfully",
        output,
    )))
}

pub async fn calculate_affordability(
    State(state): State<AppState>,
    payload: Result<Json<AffordabilityInput>, JsonRejection>,
) -> ApiResult<AffordabilityOutput> {
    let Json(mut input) = payload?;
    if input.emi_to_income_ratio.is_none() {
        input.emi_to_income_ratio = Some(state.settings.affordability.default_emi_to_income_ratio);
    }
    let output = affordability::calculate_affordability(&input)?;

    tracing::info!(
        max_affordable_emi = %output.result.max_affordable_emi,
        recommendation = output.result.recommendation.as_str(),
        "Affordability calculated"
    );
    Ok(Json(ApiResponse::from_output(
        "Affordability calculated successfully",
        output,
    )))
}

pub async fn calculate_interest_only(
    payload: Result<Json<LoanParameters>, JsonRejection>,
) -> ApiResult<InterestOnlyOutput> {
    let Json(params) = payload?;
    let output = interest_only::calculate_interest_only(&params)?;

    tracing::info!(
        principal = %params.principal,
        monthly_payment = %output.result.monthly_payment,
        "Interest-only payment calculated"
    );
    Ok(Json(ApiResponse::from_output(
        "Interest-only payment calculated successfully",
        output,
    )))
}

pub async fn compare_loans(
    payload: Result<Json<LoanComparisonInput>, JsonRejection>,
) -> ApiResult<LoanComparisonOutput> {
    let Json(input) = payload?;
    let output = comparison::compare_loans(&input)?;

    tracing::info!(
        offered = input.loans.len(),
        compared = output.result.comparison.len(),
        "Loans compared"
    );
    Ok(Json(ApiResponse::from_output("Loans compared successfully", output)))
}

pub async fn get_loan_presets(State(state): State<AppState>) -> Json<ApiResponse<Vec<LoanPreset>>> {
    Json(ApiResponse::new(
        "Loan presets retrieved successfully",
        state.presets.as_ref().clone(),
    ))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
