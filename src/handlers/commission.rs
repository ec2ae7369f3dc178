use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;

use crate::commission;
use crate::dtos::commission::{
    ApproveCommissionRequest, ApproveCommissionResponse, CalculateCommissionRequest,
    CalculateCommissionResponse,
};
use crate::error::AppError;
use crate::events::PartnerEvent;
use crate::models::commission::Commission;
use crate::state::AppState;

/// Pure calculation, no persistence.
pub fn calculate_commission(
    req: CalculateCommissionRequest,
) -> Result<CalculateCommissionResponse, AppError> {
    commission::validate_amount(req.amount)?;
    commission::validate_rate(req.rate)?;

    let effective_rate = commission::effective_rate(req.rate, req.tier_level, req.product_type);
    Ok(CalculateCommissionResponse {
        success: true,
        effective_rate,
        commission_amount: commission::commission_amount(req.amount, effective_rate),
    })
}

/// pending -> approved, the only transition this flow supports. The commission
/// update, the paired ledger completion, and the distributor running total all
/// commit together or not at all.
pub async fn approve_commission(
    state: &AppState,
    req: ApproveCommissionRequest,
) -> Result<ApproveCommissionResponse, AppError> {
    if req.approved_by.trim().is_empty() {
        return Err(AppError::validation("approved_by is required"));
    }

    let mut tx = state.db_pool.begin().await?;

    let row = sqlx::query_as::<_, Commission>(r#"SELECT * FROM commissions WHERE id = ?"#)
        .bind(req.commission_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Commission not found"))?;

    if row.status != "pending" {
        return Err(AppError::conflict(format!(
            "Commission is already {}",
            row.status
        )));
    }

    let now = Utc::now();

    sqlx::query(
        r#"UPDATE commissions
        SET status = 'approved', approved_by = ?, approved_at = ?, updated_at = ?
        WHERE id = ?"#,
    )
    .bind(&req.approved_by)
    .bind(now)
    .bind(now)
    .bind(req.commission_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"UPDATE ledger_transactions SET status = 'completed' WHERE commission_id = ?"#,
    )
    .bind(req.commission_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"UPDATE distributors SET total_earned = total_earned + ? WHERE id = ?"#,
    )
    .bind(row.commission_amount)
    .bind(row.distributor_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        commission_id = req.commission_id,
        distributor_id = row.distributor_id,
        approved_by = %req.approved_by,
        "Commission approved"
    );

    state.events.publish(PartnerEvent::CommissionApproved {
        commission_id: req.commission_id,
        distributor_id: row.distributor_id,
        commission_amount: row.commission_amount,
        approved_by: req.approved_by.clone(),
    });

    Ok(ApproveCommissionResponse {
        success: true,
        commission_id: req.commission_id,
        status: "approved".to_string(),
        commission_amount: row.commission_amount,
        approved_at: now,
    })
}

pub async fn list_commissions(
    State(AppState { db_pool, .. }): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Commission>>, AppError> {
    let distributor_id = params.get("distributor_id").and_then(|s| s.parse::<i64>().ok());
    let status = params.get("status").cloned();

    if let Some(ref status) = status {
        if status != "pending" && status != "approved" {
            return Err(AppError::validation(
                "Status must be either 'pending' or 'approved'",
            ));
        }
    }

    let mut query_str = String::from(r#"SELECT * FROM commissions WHERE 1=1"#);
    if distributor_id.is_some() {
        query_str.push_str(" AND distributor_id = ?");
    }
    if status.is_some() {
        query_str.push_str(" AND status = ?");
    }
    query_str.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, Commission>(&query_str);
    if let Some(did) = distributor_id {
        query = query.bind(did);
    }
    if let Some(status) = status {
        query = query.bind(status);
    }

    Ok(Json(query.fetch_all(&db_pool).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commission::ProductType;
    use crate::dtos::purchase::ProcessPurchaseRequest;
    use crate::handlers::purchase::process_purchase;
    use crate::test_util::{seed_distributor, test_state};

    async fn seed_commission(state: &crate::state::AppState, distributor_id: i64) -> i64 {
        let res = process_purchase(
            state,
            ProcessPurchaseRequest {
                product_id: "prod-001".to_string(),
                product_name: "Assessment Bundle".to_string(),
                product_type: ProductType::Product,
                price: 89.99,
                distributor_id,
                client_name: "Jamie Client".to_string(),
                client_email: None,
                session_id: None,
            },
        )
        .await
        .unwrap();
        res.commission_id
    }

    #[test]
    fn calculate_is_pure_and_capped() {
        let res = calculate_commission(CalculateCommissionRequest {
            amount: 100.0,
            rate: 49.0,
            tier_level: 3,
            product_type: ProductType::Package,
        })
        .unwrap();
        assert_eq!(res.effective_rate, 50.0);
        assert_eq!(res.commission_amount, 50.0);
    }

    #[tokio::test]
    async fn approves_pending_commission_once() {
        let state = test_state().await;
        let distributor_id = seed_distributor(&state, "DIST-1", 15.0, 3).await;
        let commission_id = seed_commission(&state, distributor_id).await;

        let res = approve_commission(
            &state,
            ApproveCommissionRequest {
                commission_id,
                approved_by: "admin@example.com".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(res.status, "approved");

        let (status, approved_by): (String, Option<String>) = sqlx::query_as(
            "SELECT status, approved_by FROM commissions WHERE id = ?",
        )
        .bind(commission_id)
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
        assert_eq!(status, "approved");
        assert_eq!(approved_by.as_deref(), Some("admin@example.com"));

        let ledger_status: String = sqlx::query_scalar(
            "SELECT status FROM ledger_transactions WHERE commission_id = ?",
        )
        .bind(commission_id)
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
        assert_eq!(ledger_status, "completed");

        let total_earned: f64 =
            sqlx::query_scalar("SELECT total_earned FROM distributors WHERE id = ?")
                .bind(distributor_id)
                .fetch_one(&state.db_pool)
                .await
                .unwrap();
        assert_eq!(total_earned, 18.0);
    }

    #[tokio::test]
    async fn second_approval_fails_and_leaves_row_unchanged() {
        let state = test_state().await;
        let distributor_id = seed_distributor(&state, "DIST-1", 15.0, 3).await;
        let commission_id = seed_commission(&state, distributor_id).await;

        approve_commission(
            &state,
            ApproveCommissionRequest {
                commission_id,
                approved_by: "admin@example.com".to_string(),
            },
        )
        .await
        .unwrap();

        let before = sqlx::query_as::<_, Commission>("SELECT * FROM commissions WHERE id = ?")
            .bind(commission_id)
            .fetch_one(&state.db_pool)
            .await
            .unwrap();

        let err = approve_commission(
            &state,
            ApproveCommissionRequest {
                commission_id,
                approved_by: "other@example.com".to_string(),
            },
        )
        .await
        .unwrap_err();
        match err {
            AppError::Conflict(msg) => assert!(msg.contains("already approved")),
            other => panic!("expected conflict, got {other:?}"),
        }

        let after = sqlx::query_as::<_, Commission>("SELECT * FROM commissions WHERE id = ?")
            .bind(commission_id)
            .fetch_one(&state.db_pool)
            .await
            .unwrap();
        assert_eq!(after.approved_by, before.approved_by);
        assert_eq!(after.updated_at, before.updated_at);

        // Running total was not incremented twice.
        let total_earned: f64 =
            sqlx::query_scalar("SELECT total_earned FROM distributors WHERE id = ?")
                .bind(distributor_id)
                .fetch_one(&state.db_pool)
                .await
                .unwrap();
        assert_eq!(total_earned, 18.0);
    }

    #[tokio::test]
    async fn approving_missing_commission_is_not_found() {
        let state = test_state().await;
        let err = approve_commission(
            &state,
            ApproveCommissionRequest {
                commission_id: 42,
                approved_by: "admin@example.com".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
