use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::commission::round_cents;
use crate::dtos::dashboard::DashboardStats;
use crate::error::AppError;
use crate::state::AppState;

/// Aggregates behind the distributor dashboard stat cards. Values are
/// recomputed per request; the dashboard polls or rides the event stream.
pub async fn get_stats(
    State(AppState { db_pool, .. }): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<DashboardStats>, AppError> {
    let distributor_id = params
        .get("distributor_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| AppError::validation("distributor_id query parameter is required"))?;

    let exists: Option<i64> = sqlx::query_scalar(r#"SELECT id FROM distributors WHERE id = ?"#)
        .bind(distributor_id)
        .fetch_optional(&db_pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::not_found("Distributor not found"));
    }

    let (total_sales, sales_count): (f64, i64) = sqlx::query_as(
        r#"SELECT COALESCE(SUM(price), 0.0), COUNT(*) FROM purchases WHERE distributor_id = ?"#,
    )
    .bind(distributor_id)
    .fetch_one(&db_pool)
    .await?;

    let (pending_amount, pending_count): (f64, i64) = sqlx::query_as(
        r#"SELECT COALESCE(SUM(commission_amount), 0.0), COUNT(*)
        FROM commissions WHERE distributor_id = ? AND status = 'pending'"#,
    )
    .bind(distributor_id)
    .fetch_one(&db_pool)
    .await?;

    let approved_amount: f64 = sqlx::query_scalar(
        r#"SELECT COALESCE(SUM(commission_amount), 0.0)
        FROM commissions WHERE distributor_id = ? AND status = 'approved'"#,
    )
    .bind(distributor_id)
    .fetch_one(&db_pool)
    .await?;

    let withdrawn_amount: f64 = sqlx::query_scalar(
        r#"SELECT COALESCE(SUM(amount), 0.0) FROM withdrawals WHERE distributor_id = ?"#,
    )
    .bind(distributor_id)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(DashboardStats {
        distributor_id,
        total_sales: round_cents(total_sales),
        sales_count,
        pending_amount: round_cents(pending_amount),
        pending_count,
        approved_amount: round_cents(approved_amount),
        withdrawn_amount: round_cents(withdrawn_amount),
        available_balance: round_cents(approved_amount - withdrawn_amount),
    }))
}

/// SSE bridge over the broadcast bus. Lagged subscribers skip dropped events
/// and keep receiving; delivery is at-most-once with no replay.
pub async fn event_stream(
    State(AppState { events, .. }): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(events.subscribe()).filter_map(|item| match item {
        Ok(event) => {
            let name = event.name();
            serde_json::to_string(&event)
                .ok()
                .map(|payload| Ok(Event::default().event(name).data(payload)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
