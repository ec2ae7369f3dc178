use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Immutable record of a confirmed checkout. The commission rate stored here
/// is the effective rate snapshotted at creation time.
#[derive(Debug, Serialize, FromRow)]
pub struct Purchase {
    pub id: i64,
    pub product_id: String,
    pub product_name: String,
    pub product_type: String,
    pub price: f64,
    pub commission_rate: f64,
    pub distributor_id: i64,
    pub client_name: String,
    pub client_email: Option<String>,
    pub session_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
