use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BackfillResponse {
    pub success: bool,
    pub created: u64,
}
