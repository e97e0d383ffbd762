// src/dtos/report.rs
use serde::Serialize;

#[derive(Serialize)]
pub struct SalesSummaryResponse {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub paid_amount: f64,
    pub credit_amount: f64,
    pub pending_amount: f64,
}

#[derive(Serialize)]
pub struct DashboardMetricsResponse {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
}
