use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::dashboard;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route_layer(middleware::from_fn(require_auth));

    // EventSource cannot attach an Authorization header
    let open = Router::new().route("/events", get(dashboard::event_stream));

    protected.merge(open)
}
