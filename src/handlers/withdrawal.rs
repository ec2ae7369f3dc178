use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;

use crate::commission::{self, round_cents};
use crate::dtos::withdrawal::{ProcessWithdrawalRequest, ProcessWithdrawalResponse};
use crate::error::AppError;
use crate::events::PartnerEvent;
use crate::models::withdrawal::Withdrawal;
use crate::state::AppState;

/// Available balance is approved commissions minus everything already
/// requested. The check and the inserts share one transaction so two racing
/// requests cannot both pass the check.
pub async fn process_withdrawal(
    state: &AppState,
    req: ProcessWithdrawalRequest,
) -> Result<ProcessWithdrawalResponse, AppError> {
    commission::validate_amount(req.amount)?;
    if req.method.trim().is_empty() {
        return Err(AppError::validation("Withdrawal method is required"));
    }

    let mut tx = state.db_pool.begin().await?;

    let distributor: Option<i64> = sqlx::query_scalar(r#"SELECT id FROM distributors WHERE id = ?"#)
        .bind(req.distributor_id)
        .fetch_optional(&mut *tx)
        .await?;
    if distributor.is_none() {
        return Err(AppError::not_found("Distributor not found"));
    }

    let approved: f64 = sqlx::query_scalar(
        r#"SELECT COALESCE(SUM(commission_amount), 0.0)
        FROM commissions
        WHERE distributor_id = ? AND status = 'approved'"#,
    )
    .bind(req.distributor_id)
    .fetch_one(&mut *tx)
    .await?;

    let withdrawn: f64 = sqlx::query_scalar(
        r#"SELECT COALESCE(SUM(amount), 0.0) FROM withdrawals WHERE distributor_id = ?"#,
    )
    .bind(req.distributor_id)
    .fetch_one(&mut *tx)
    .await?;

    let balance = round_cents(approved - withdrawn);
    if req.amount > balance {
        return Err(AppError::validation(format!(
            "Requested amount {:.2} exceeds available balance {:.2}",
            req.amount, balance
        )));
    }

    let now = Utc::now();

    let withdrawal_id: i64 = sqlx::query_scalar(
        r#"INSERT INTO withdrawals (distributor_id, amount, method, status, created_at)
        VALUES (?, ?, ?, 'pending', ?)
        RETURNING id"#,
    )
    .bind(req.distributor_id)
    .bind(req.amount)
    .bind(&req.method)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"INSERT INTO ledger_transactions
            (distributor_id, withdrawal_id, amount, kind, status, description, created_at)
        VALUES (?, ?, ?, 'withdrawal', 'pending', ?, ?)"#,
    )
    .bind(req.distributor_id)
    .bind(withdrawal_id)
    .bind(-req.amount)
    .bind(format!("Withdrawal via {}", req.method))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        withdrawal_id,
        distributor_id = req.distributor_id,
        amount = req.amount,
        method = %req.method,
        "Withdrawal requested"
    );

    // Admin channel notification.
    state.events.publish(PartnerEvent::WithdrawalRequested {
        withdrawal_id,
        distributor_id: req.distributor_id,
        amount: req.amount,
        method: req.method.clone(),
    });

    Ok(ProcessWithdrawalResponse {
        success: true,
        withdrawal_id,
        amount: req.amount,
        status: "pending".to_string(),
        remaining_balance: round_cents(balance - req.amount),
    })
}

pub async fn list_withdrawals(
    State(AppState { db_pool, .. }): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Withdrawal>>, AppError> {
    let distributor_id = params.get("distributor_id").and_then(|s| s.parse::<i64>().ok());

    let mut query_str = String::from(r#"SELECT * FROM withdrawals WHERE 1=1"#);
    if distributor_id.is_some() {
        query_str.push_str(" AND distributor_id = ?");
    }
    query_str.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, Withdrawal>(&query_str);
    if let Some(did) = distributor_id {
        query = query.bind(did);
    }

    Ok(Json(query.fetch_all(&db_pool).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commission::ProductType;
    use crate::dtos::commission::ApproveCommissionRequest;
    use crate::dtos::purchase::ProcessPurchaseRequest;
    use crate::handlers::commission::approve_commission;
    use crate::handlers::purchase::process_purchase;
    use crate::state::AppState;
    use crate::test_util::{seed_distributor, test_state};

    async fn seed_approved_commission(state: &AppState, distributor_id: i64) {
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
        approve_commission(
            state,
            ApproveCommissionRequest {
                commission_id: res.commission_id,
                approved_by: "admin@example.com".to_string(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn over_balance_request_creates_no_rows() {
        let state = test_state().await;
        let distributor_id = seed_distributor(&state, "DIST-1", 15.0, 3).await;
        seed_approved_commission(&state, distributor_id).await;

        // Balance is 18.00; ask for more.
        let err = process_withdrawal(
            &state,
            ProcessWithdrawalRequest {
                distributor_id,
                amount: 20.0,
                method: "bank_transfer".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let withdrawals: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM withdrawals")
            .fetch_one(&state.db_pool)
            .await
            .unwrap();
        assert_eq!(withdrawals, 0);
        let ledger_rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ledger_transactions WHERE kind = 'withdrawal'",
        )
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
        assert_eq!(ledger_rows, 0);
    }

    #[tokio::test]
    async fn withdrawal_within_balance_reserves_it() {
        let state = test_state().await;
        let distributor_id = seed_distributor(&state, "DIST-1", 15.0, 3).await;
        seed_approved_commission(&state, distributor_id).await;

        let res = process_withdrawal(
            &state,
            ProcessWithdrawalRequest {
                distributor_id,
                amount: 10.0,
                method: "bank_transfer".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(res.status, "pending");
        assert_eq!(res.remaining_balance, 8.0);

        // The pending withdrawal already counts against the balance.
        let err = process_withdrawal(
            &state,
            ProcessWithdrawalRequest {
                distributor_id,
                amount: 10.0,
                method: "bank_transfer".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let ledger_amount: f64 = sqlx::query_scalar(
            "SELECT amount FROM ledger_transactions WHERE withdrawal_id = ?",
        )
        .bind(res.withdrawal_id)
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
        assert_eq!(ledger_amount, -10.0);
    }

    #[tokio::test]
    async fn pending_commissions_do_not_count_toward_balance() {
        let state = test_state().await;
        let distributor_id = seed_distributor(&state, "DIST-1", 15.0, 3).await;
        // Pending only, never approved.
        process_purchase(
            &state,
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

        let err = process_withdrawal(
            &state,
            ProcessWithdrawalRequest {
                distributor_id,
                amount: 1.0,
                method: "bank_transfer".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
