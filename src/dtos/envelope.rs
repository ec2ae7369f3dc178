use serde::Deserialize;

use crate::dtos::commission::{ApproveCommissionRequest, CalculateCommissionRequest};
use crate::dtos::distributor::ValidateDistributorRequest;
use crate::dtos::purchase::ProcessPurchaseRequest;
use crate::dtos::withdrawal::ProcessWithdrawalRequest;

/// Wire envelope for the commission endpoint: `{"type": ..., "data": {...}}`.
/// Unknown types fail deserialization and surface as a 400.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CommissionOp {
    ProcessPurchase(ProcessPurchaseRequest),
    CalculateCommission(CalculateCommissionRequest),
    ApproveCommission(ApproveCommissionRequest),
    ProcessWithdrawal(ProcessWithdrawalRequest),
    ValidateDistributor(ValidateDistributorRequest),
}
