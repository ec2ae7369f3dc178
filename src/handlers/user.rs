use bcrypt::{hash, verify, DEFAULT_COST};
use crate::dtos::user::{
    CreateAuthUserRequest, CreateAuthUserResponse, UserResponse, LoginRequest, LoginResponse,
};
use crate::dtos::valid_email;
use crate::auth::jwt::sign_token;
use crate::error::AppError;
use crate::models::activation_code::ActivationCode;
use crate::models::user::User;
use axum::{extract::State, Json};
use crate::state::AppState;
use crate::middleware::auth::AuthContext;
use axum::extract::Extension;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

const ASSESSMENT_TYPES: [&str; 2] = ["standard", "extended"];
const PLAN_TYPES: [&str; 2] = ["basic", "premium"];

fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Exchanges an activation code for a dashboard account. A duplicate email is
/// not an error: the account already exists, so the flow falls back to a
/// password reset instead of surfacing a failure to the funnel.
pub async fn create_auth_user(
    State(AppState { db_pool, .. }): State<AppState>,
    Json(payload): Json<CreateAuthUserRequest>,
) -> Result<(axum::http::StatusCode, Json<CreateAuthUserResponse>), AppError> {
    if !valid_email(&payload.email) {
        return Err(AppError::validation("Invalid email address"));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let meta = &payload.metadata;
    if !ASSESSMENT_TYPES.contains(&meta.assessment_type.as_str()) {
        return Err(AppError::validation("Unknown assessment type"));
    }
    if !PLAN_TYPES.contains(&meta.plan_type.as_str()) {
        return Err(AppError::validation("Unknown plan type"));
    }

    let mut tx = db_pool.begin().await?;

    let code = sqlx::query_as::<_, ActivationCode>(
        r#"SELECT * FROM activation_codes WHERE id = ?"#,
    )
    .bind(meta.activation_code_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Activation code not found"))?;

    if code.status != "unused" {
        return Err(AppError::conflict("Activation code already used"));
    }

    let temp_password = generate_temp_password();
    let password_hash = hash(&temp_password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let inserted: Result<i64, sqlx::Error> = sqlx::query_scalar(
        r#"INSERT INTO users
            (email, name, role, password_hash, is_active, distributor_id,
             activation_code_id, assessment_type, plan_type, group_id, created_at)
        VALUES (?, ?, 'distributor', ?, 1, ?, ?, ?, ?, ?, ?)
        RETURNING id"#,
    )
    .bind(&payload.email)
    .bind(payload.name.trim())
    .bind(&password_hash)
    .bind(meta.distributor_id)
    .bind(meta.activation_code_id)
    .bind(&meta.assessment_type)
    .bind(&meta.plan_type)
    .bind(&meta.group_id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(user_id) => {
            sqlx::query(
                r#"UPDATE activation_codes SET status = 'used', used_at = ? WHERE id = ?"#,
            )
            .bind(Utc::now())
            .bind(meta.activation_code_id)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;

            tracing::info!(user_id, email = %payload.email, "Auth user created");

            Ok((
                axum::http::StatusCode::CREATED,
                Json(CreateAuthUserResponse {
                    success: true,
                    user_id: Some(user_id),
                    email: payload.email,
                    temporary_password: Some(temp_password),
                    existing_user: false,
                }),
            ))
        }
        Err(e) if e.as_database_error().is_some_and(|db| db.is_unique_violation()) => {
            tx.rollback().await?;

            tracing::info!(email = %payload.email, "Auth user already exists, queuing password reset");

            Ok((
                axum::http::StatusCode::OK,
                Json(CreateAuthUserResponse {
                    success: true,
                    user_id: None,
                    email: payload.email,
                    temporary_password: None,
                    existing_user: true,
                }),
            ))
        }
        Err(e) => Err(AppError::db(e)),
    }
}

pub async fn login_user(
    State(AppState { db_pool, .. }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = ?"#)
        .bind(&payload.email)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid credentials"))?;

    if !user.is_active {
        return Err(AppError::conflict("User inactive"));
    }

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::validation("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.role, &user.email, &secret)?;

    // 8 hours = 28800 seconds
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: 8 * 60 * 60,
    }))
}

// Authenticated endpoint: returns full user profile from DB using the id in AuthContext
pub async fn get_me(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = ?"#)
        .bind(auth.user_id)
        .fetch_one(&db_pool)
        .await?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
        is_active: user.is_active,
        distributor_id: user.distributor_id,
        created_at: user.created_at,
    }))
}
