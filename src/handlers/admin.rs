use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;

use crate::dtos::admin::BackfillResponse;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Recreates commission rows for purchases that never got one (a funnel
/// deploy gap, a dropped write). Keyed on session_id, so re-running is a
/// no-op for anything already covered.
pub async fn backfill_commissions(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<BackfillResponse>, AppError> {
    if auth.role != "admin" {
        return Err(AppError::forbidden("Admin role required"));
    }

    let now = Utc::now();
    let result = sqlx::query(
        r#"INSERT INTO commissions
            (distributor_id, purchase_id, product_id, product_name, client_name, client_email,
             sale_amount, commission_rate, commission_amount, status, session_id,
             created_at, updated_at)
        SELECT p.distributor_id, p.id, p.product_id, p.product_name, p.client_name, p.client_email,
               p.price, p.commission_rate, ROUND(p.price * p.commission_rate / 100.0, 2),
               'pending', p.session_id, ?, ?
        FROM purchases p
        WHERE NOT EXISTS (SELECT 1 FROM commissions c WHERE c.session_id = p.session_id)"#,
    )
    .bind(now)
    .bind(now)
    .execute(&db_pool)
    .await?;

    let created = result.rows_affected();
    tracing::info!(created, triggered_by = %auth.email, "Commission backfill complete");

    Ok(Json(BackfillResponse {
        success: true,
        created,
    }))
}
