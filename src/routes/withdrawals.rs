use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::withdrawal;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/withdrawals", get(withdrawal::list_withdrawals))
        .route_layer(middleware::from_fn(require_auth))
}
