use axum::{Router, routing::{post, get}, middleware};
use crate::state::AppState;
use crate::handlers::user::{create_auth_user, login_user, get_me};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/auth/users", post(create_auth_user))
        .route("/auth/login", post(login_user));

    let protected = Router::new()
        .route("/auth/me", get(get_me))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
