use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct Withdrawal {
    pub id: i64,
    pub distributor_id: i64,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
