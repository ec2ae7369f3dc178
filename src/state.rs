// src/state.rs
use sqlx::SqlitePool;

use crate::events::EventBus;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub events: EventBus,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        AppState {
            db_pool,
            events: EventBus::new(),
        }
    }
}
