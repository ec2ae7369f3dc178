use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::commission;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/commissions", get(commission::list_commissions))
        .route_layer(middleware::from_fn(require_auth))
}
