use serde::{Deserialize, Serialize};

use crate::commission::ProductType;

#[derive(Debug, Deserialize)]
pub struct ProcessPurchaseRequest {
    pub product_id: String,
    pub product_name: String,
    pub product_type: ProductType,
    pub price: f64,
    pub distributor_id: i64,
    pub client_name: String,
    pub client_email: Option<String>,
    /// Funnel session identifier; generated server-side when absent.
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessPurchaseResponse {
    pub success: bool,
    pub purchase_id: i64,
    pub commission_id: i64,
    pub session_id: String,
    pub effective_rate: f64,
    pub commission_amount: f64,
}
