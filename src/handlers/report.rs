// src/handlers/report.rs
//
// Pure aggregation over the sale and expense ledgers.
use axum::{extract::State, Json};
use crate::dtos::report::{DashboardMetricsResponse, SalesSummaryResponse};
use crate::error::AppError;
use crate::state::AppState;

// GET /sales-summary?date=
pub async fn sales_summary(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Result<Json<SalesSummaryResponse>, AppError> {
    let date_filter = params.get("date").and_then(|d| d.parse::<chrono::NaiveDate>().ok());

    let select = "SELECT
            COUNT(*),
            COALESCE(SUM(total_amount), 0),
            COALESCE(SUM(CASE WHEN payment_status = 'Paid' THEN total_amount ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN payment_status = 'Credit' THEN total_amount ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN payment_status = 'Pending' THEN total_amount ELSE 0 END), 0)
        FROM sales";

    let (total_sales, total_revenue, paid_amount, credit_amount, pending_amount) = match date_filter {
        Some(date) => {
            sqlx::query_as::<_, (i64, f64, f64, f64, f64)>(&format!("{select} WHERE date = $1"))
                .bind(date)
                .fetch_one(&db_pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, (i64, f64, f64, f64, f64)>(select)
                .fetch_one(&db_pool)
                .await?
        }
    };

    Ok(Json(SalesSummaryResponse {
        total_sales,
        total_revenue,
        paid_amount,
        credit_amount,
        pending_amount,
    }))
}

// GET /dashboard-metrics?date= - Revenue vs expenses
pub async fn dashboard_metrics(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Result<Json<DashboardMetricsResponse>, AppError> {
    let date_filter = params.get("date").and_then(|d| d.parse::<chrono::NaiveDate>().ok());

    let (total_revenue, total_expenses) = match date_filter {
        Some(date) => {
            let revenue = sqlx::query_scalar::<_, Option<f64>>(
                "SELECT SUM(total_amount) FROM sales WHERE date = $1",
            )
            .bind(date)
            .fetch_one(&db_pool)
            .await?;
            let expenses = sqlx::query_scalar::<_, Option<f64>>(
                "SELECT SUM(amount) FROM expenses WHERE date = $1",
            )
            .bind(date)
            .fetch_one(&db_pool)
            .await?;
            (revenue, expenses)
        }
        None => {
            let revenue = sqlx::query_scalar::<_, Option<f64>>("SELECT SUM(total_amount) FROM sales")
                .fetch_one(&db_pool)
                .await?;
            let expenses = sqlx::query_scalar::<_, Option<f64>>("SELECT SUM(amount) FROM expenses")
                .fetch_one(&db_pool)
                .await?;
            (revenue, expenses)
        }
    };

    let total_revenue = total_revenue.unwrap_or(0.0);
    let total_expenses = total_expenses.unwrap_or(0.0);

    Ok(Json(DashboardMetricsResponse {
        total_revenue,
        total_expenses,
        net_profit: total_revenue - total_expenses,
    }))
}
