use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;

use crate::commission;
use crate::dtos::distributor::{
    CreateDistributorRequest, ValidateDistributorRequest, ValidateDistributorResponse,
};
use crate::dtos::valid_email;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::distributor::Distributor;
use crate::state::AppState;

/// Funnel-side check that a referral code belongs to an active distributor.
pub async fn validate_distributor(
    state: &AppState,
    req: ValidateDistributorRequest,
) -> Result<ValidateDistributorResponse, AppError> {
    if req.code.trim().is_empty() {
        return Err(AppError::validation("Distributor code is required"));
    }

    let distributor = sqlx::query_as::<_, Distributor>(
        r#"SELECT * FROM distributors WHERE code = ?"#,
    )
    .bind(req.code.trim())
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Distributor not found"))?;

    if distributor.status != "active" {
        return Err(AppError::validation("Distributor is not active"));
    }

    Ok(ValidateDistributorResponse {
        success: true,
        distributor_id: distributor.id,
        name: distributor.name,
        commission_rate: distributor.commission_rate,
        tier_level: distributor.tier_level,
    })
}

pub async fn create_distributor(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateDistributorRequest>,
) -> Result<(StatusCode, Json<Distributor>), AppError> {
    if auth.role != "admin" {
        return Err(AppError::forbidden("Only admins can create distributors"));
    }
    if req.code.trim().is_empty() || req.name.trim().is_empty() {
        return Err(AppError::validation("Code and name are required"));
    }
    commission::validate_rate(req.commission_rate)?;
    if req.tier_level < 1 {
        return Err(AppError::validation("Tier level must be at least 1"));
    }
    if let Some(ref email) = req.email {
        if !valid_email(email) {
            return Err(AppError::validation("Email is not a valid address"));
        }
    }

    let distributor = sqlx::query_as::<_, Distributor>(
        r#"INSERT INTO distributors (code, name, email, commission_rate, tier_level, status, total_earned, created_at)
        VALUES (?, ?, ?, ?, ?, 'active', 0, ?)
        RETURNING *"#,
    )
    .bind(req.code.trim())
    .bind(req.name.trim())
    .bind(&req.email)
    .bind(req.commission_rate)
    .bind(req.tier_level)
    .bind(Utc::now())
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
            AppError::conflict("Distributor code already exists")
        } else {
            AppError::db(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(distributor)))
}

pub async fn get_distributor(
    State(AppState { db_pool, .. }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Distributor>, AppError> {
    let distributor = sqlx::query_as::<_, Distributor>(r#"SELECT * FROM distributors WHERE id = ?"#)
        .bind(id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Distributor not found"))?;
    Ok(Json(distributor))
}

pub async fn list_distributors(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<Vec<Distributor>>, AppError> {
    let distributors =
        sqlx::query_as::<_, Distributor>(r#"SELECT * FROM distributors ORDER BY id"#)
            .fetch_all(&db_pool)
            .await?;
    Ok(Json(distributors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{seed_distributor, test_state};

    #[tokio::test]
    async fn validates_active_code() {
        let state = test_state().await;
        let id = seed_distributor(&state, "GOLD-7", 12.5, 2).await;

        let res = validate_distributor(
            &state,
            ValidateDistributorRequest {
                code: "GOLD-7".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(res.distributor_id, id);
        assert_eq!(res.commission_rate, 12.5);
        assert_eq!(res.tier_level, 2);
    }

    #[tokio::test]
    async fn suspended_distributor_is_rejected() {
        let state = test_state().await;
        let id = seed_distributor(&state, "GOLD-7", 12.5, 2).await;
        sqlx::query("UPDATE distributors SET status = 'suspended' WHERE id = ?")
            .bind(id)
            .execute(&state.db_pool)
            .await
            .unwrap();

        let err = validate_distributor(
            &state,
            ValidateDistributorRequest {
                code: "GOLD-7".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let state = test_state().await;
        let err = validate_distributor(
            &state,
            ValidateDistributorRequest {
                code: "NOPE".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
