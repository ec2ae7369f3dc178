use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct Distributor {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub commission_rate: f64,
    pub tier_level: i64,
    pub status: String,
    pub total_earned: f64,
    pub created_at: DateTime<Utc>,
}
