use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProcessWithdrawalRequest {
    pub distributor_id: i64,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessWithdrawalResponse {
    pub success: bool,
    pub withdrawal_id: i64,
    pub amount: f64,
    pub status: String,
    pub remaining_balance: f64,
}
