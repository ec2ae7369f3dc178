use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Deserialize)]
pub struct CreateAuthUserRequest {
    pub email: String,
    pub name: String,
    pub metadata: AuthUserMetadata,
}

#[derive(Deserialize)]
pub struct AuthUserMetadata {
    pub activation_code_id: i64,
    pub distributor_id: Option<i64>,
    pub assessment_type: String,
    pub plan_type: String,
    pub group_id: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CreateAuthUserResponse {
    pub success: bool,
    pub user_id: Option<i64>,
    pub email: String,
    /// Returned exactly once, on first creation.
    pub temporary_password: Option<String>,
    pub existing_user: bool,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub distributor_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in_seconds: usize,
}
