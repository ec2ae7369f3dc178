use chrono::Utc;
use uuid::Uuid;

use crate::commission;
use crate::dtos::purchase::{ProcessPurchaseRequest, ProcessPurchaseResponse};
use crate::dtos::valid_email;
use crate::error::AppError;
use crate::events::PartnerEvent;
use crate::models::distributor::Distributor;
use crate::state::AppState;

/// Confirmed checkout: one purchase row, one pending commission row, one
/// pending ledger credit, all in a single transaction. The dashboard
/// broadcast afterwards is best-effort and never fails the purchase.
pub async fn process_purchase(
    state: &AppState,
    req: ProcessPurchaseRequest,
) -> Result<ProcessPurchaseResponse, AppError> {
    commission::validate_amount(req.price)?;
    if req.product_id.trim().is_empty() || req.product_name.trim().is_empty() {
        return Err(AppError::validation("Product id and name are required"));
    }
    if req.client_name.trim().is_empty() {
        return Err(AppError::validation("Client name is required"));
    }
    if let Some(ref email) = req.client_email {
        if !valid_email(email) {
            return Err(AppError::validation("Client email is not a valid address"));
        }
    }

    let session_id = match req.session_id {
        Some(s) if !s.trim().is_empty() => s,
        _ => Uuid::new_v4().to_string(),
    };

    let distributor = sqlx::query_as::<_, Distributor>(
        r#"SELECT * FROM distributors WHERE id = ?"#,
    )
    .bind(req.distributor_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Distributor not found"))?;

    if distributor.status != "active" {
        return Err(AppError::validation("Distributor is not active"));
    }
    commission::validate_rate(distributor.commission_rate)?;

    let effective_rate = commission::effective_rate(
        distributor.commission_rate,
        distributor.tier_level,
        req.product_type,
    );
    let commission_amount = commission::commission_amount(req.price, effective_rate);
    let now = Utc::now();

    let mut tx = state.db_pool.begin().await?;

    let purchase_id: i64 = sqlx::query_scalar(
        r#"INSERT INTO purchases
            (product_id, product_name, product_type, price, commission_rate,
             distributor_id, client_name, client_email, session_id, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'completed', ?)
        RETURNING id"#,
    )
    .bind(&req.product_id)
    .bind(&req.product_name)
    .bind(req.product_type.as_str())
    .bind(req.price)
    .bind(effective_rate)
    .bind(req.distributor_id)
    .bind(&req.client_name)
    .bind(&req.client_email)
    .bind(&session_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let commission_id: i64 = sqlx::query_scalar(
        r#"INSERT INTO commissions
            (distributor_id, purchase_id, product_id, product_name, client_name, client_email,
             sale_amount, commission_rate, commission_amount, status, session_id,
             created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?, ?)
        RETURNING id"#,
    )
    .bind(req.distributor_id)
    .bind(purchase_id)
    .bind(&req.product_id)
    .bind(&req.product_name)
    .bind(&req.client_name)
    .bind(&req.client_email)
    .bind(req.price)
    .bind(effective_rate)
    .bind(commission_amount)
    .bind(&session_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
            AppError::conflict("A commission already exists for this session")
        } else {
            AppError::db(e)
        }
    })?;

    sqlx::query(
        r#"INSERT INTO ledger_transactions
            (distributor_id, commission_id, amount, kind, status, description, created_at)
        VALUES (?, ?, ?, 'commission', 'pending', ?, ?)"#,
    )
    .bind(req.distributor_id)
    .bind(commission_id)
    .bind(commission_amount)
    .bind(format!("Commission for {}", req.product_name))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        purchase_id,
        commission_id,
        distributor_id = req.distributor_id,
        amount = commission_amount,
        "Purchase processed"
    );

    state.events.publish(PartnerEvent::CommissionCreated {
        commission_id,
        distributor_id: req.distributor_id,
        product_name: req.product_name.clone(),
        commission_amount,
        session_id: session_id.clone(),
    });

    Ok(ProcessPurchaseResponse {
        success: true,
        purchase_id,
        commission_id,
        session_id,
        effective_rate,
        commission_amount,
    })
}
