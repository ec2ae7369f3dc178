use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub distributor_id: i64,
    pub total_sales: f64,
    pub sales_count: i64,
    pub pending_amount: f64,
    pub pending_count: i64,
    pub approved_amount: f64,
    pub withdrawn_amount: f64,
    pub available_balance: f64,
}
