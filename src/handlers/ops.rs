use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::dtos::envelope::CommissionOp;
use crate::error::AppError;
use crate::handlers::{commission, distributor, purchase, withdrawal};
use crate::state::AppState;

/// Single entry point for the funnel: a `{type, data}` envelope dispatched to
/// the matching operation. Responses carry `success: true`; failures map to
/// the shared error body.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(op): Json<CommissionOp>,
) -> Result<Json<serde_json::Value>, AppError> {
    match op {
        CommissionOp::ProcessPurchase(req) => {
            to_json(purchase::process_purchase(&state, req).await?)
        }
        CommissionOp::CalculateCommission(req) => to_json(commission::calculate_commission(req)?),
        CommissionOp::ApproveCommission(req) => {
            to_json(commission::approve_commission(&state, req).await?)
        }
        CommissionOp::ProcessWithdrawal(req) => {
            to_json(withdrawal::process_withdrawal(&state, req).await?)
        }
        CommissionOp::ValidateDistributor(req) => {
            to_json(distributor::validate_distributor(&state, req).await?)
        }
    }
}

fn to_json<T: Serialize>(response: T) -> Result<Json<serde_json::Value>, AppError> {
    serde_json::to_value(response)
        .map(Json)
        .map_err(|e| AppError::internal(format!("Response serialization failed: {e}")))
}
