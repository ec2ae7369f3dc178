use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct ActivationCode {
    pub id: i64,
    pub code: String,
    pub purchase_id: Option<i64>,
    pub distributor_id: Option<i64>,
    pub session_id: Option<String>,
    pub assessment_type: Option<String>,
    pub plan_type: Option<String>,
    pub group_id: Option<String>,
    pub status: String,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
