use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::distributor;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Admin-only create is enforced in the handler via AuthContext
        .route(
            "/distributors",
            get(distributor::list_distributors).post(distributor::create_distributor),
        )
        .route("/distributors/{id}", get(distributor::get_distributor))
        .route_layer(middleware::from_fn(require_auth))
}
