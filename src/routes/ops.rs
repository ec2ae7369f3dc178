use axum::{Router, routing::post};
use crate::state::AppState;
use crate::handlers::ops;

pub fn routes() -> Router<AppState> {
    // Open route - the funnel posts operation envelopes here
    Router::new().route("/commission", post(ops::dispatch))
}
