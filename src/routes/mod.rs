pub mod admin;
pub mod commissions;
pub mod dashboard;
pub mod distributors;
pub mod ops;
pub mod users;
pub mod withdrawals;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(ops::routes())
        .merge(users::routes())
        .merge(distributors::routes())
        .merge(commissions::routes())
        .merge(withdrawals::routes())
        .merge(dashboard::routes())
        .merge(admin::routes())
}
