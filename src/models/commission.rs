use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct Commission {
    pub id: i64,
    pub distributor_id: i64,
    pub purchase_id: Option<i64>,
    pub product_id: String,
    pub product_name: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub sale_amount: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub status: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
}
