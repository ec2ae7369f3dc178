use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ValidateDistributorRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateDistributorResponse {
    pub success: bool,
    pub distributor_id: i64,
    pub name: String,
    pub commission_rate: f64,
    pub tier_level: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateDistributorRequest {
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub commission_rate: f64,
    #[serde(default = "default_tier")]
    pub tier_level: i64,
}

fn default_tier() -> i64 {
    1
}
