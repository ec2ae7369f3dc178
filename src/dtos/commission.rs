use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::commission::ProductType;

#[derive(Debug, Deserialize)]
pub struct CalculateCommissionRequest {
    pub amount: f64,
    pub rate: f64,
    #[serde(default = "default_tier")]
    pub tier_level: i64,
    pub product_type: ProductType,
}

fn default_tier() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct CalculateCommissionResponse {
    pub success: bool,
    pub effective_rate: f64,
    pub commission_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApproveCommissionRequest {
    pub commission_id: i64,
    pub approved_by: String,
}

#[derive(Debug, Serialize)]
pub struct ApproveCommissionResponse {
    pub success: bool,
    pub commission_id: i64,
    pub status: String,
    pub commission_amount: f64,
    pub approved_at: DateTime<Utc>,
}
