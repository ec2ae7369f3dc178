use serde::Serialize;
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
    pub is_active: bool,
    pub distributor_id: Option<i64>,
    pub activation_code_id: Option<i64>,
    pub assessment_type: Option<String>,
    pub plan_type: Option<String>,
    pub group_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
