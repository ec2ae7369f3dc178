use axum::{Router, routing::post, middleware};
use crate::state::AppState;
use crate::handlers::admin;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/backfill", post(admin::backfill_commissions))
        .route_layer(middleware::from_fn(require_auth))
}
