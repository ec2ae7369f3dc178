// Shared fixtures for handler tests: an AppState over a fresh in-memory
// database with the migrations applied.
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;

use crate::state::AppState;

pub async fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!().run(&pool).await.expect("migrations");
    AppState::new(pool)
}

pub async fn seed_distributor(state: &AppState, code: &str, rate: f64, tier: i64) -> i64 {
    sqlx::query_scalar(
        r#"INSERT INTO distributors (code, name, commission_rate, tier_level, status, total_earned, created_at)
        VALUES (?, ?, ?, ?, 'active', 0, ?)
        RETURNING id"#,
    )
    .bind(code)
    .bind(format!("Distributor {code}"))
    .bind(rate)
    .bind(tier)
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await
    .expect("seed distributor")
}

pub async fn seed_activation_code(state: &AppState, code: &str) -> i64 {
    sqlx::query_scalar(
        r#"INSERT INTO activation_codes (code, status, created_at)
        VALUES (?, 'unused', ?)
        RETURNING id"#,
    )
    .bind(code)
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await
    .expect("seed activation code")
}
