// src/handlers/expense.rs
use axum::{
    extract::{Path, State},
    Json,
};
use axum::http::StatusCode;
use crate::dtos::expense::{
    CategoryTotal, CreateExpenseRequest, ExpenseResponse, ExpensesSummaryResponse,
};
use crate::dtos::StatusResponse;
use crate::error::AppError;
use crate::models::expense::Expense;
use crate::state::AppState;

const EXPENSE_COLUMNS: &str = "id, description, category, amount, date, time, notes";

// POST /add-expense
pub async fn add_expense(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    let description = req.description.trim();
    let category = req.category.trim();
    if description.is_empty() || category.is_empty() || req.amount <= 0.0 {
        return Err(AppError::validation("Invalid expense data"));
    }

    let notes = req.notes.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let time = chrono::Local::now().time();

    sqlx::query(
        "INSERT INTO expenses (description, category, amount, date, time, notes)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(description)
    .bind(category)
    .bind(req.amount)
    .bind(req.date)
    .bind(time)
    .bind(notes)
    .execute(&db_pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::ok("Expense recorded successfully")),
    ))
}

// GET /expenses?date=&category=
pub async fn list_expenses(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let date_filter = params.get("date").and_then(|d| d.parse::<chrono::NaiveDate>().ok());
    let category_filter = params
        .get("category")
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string());

    let expenses = match (date_filter, category_filter) {
        (Some(date), Some(category)) => {
            sqlx::query_as::<_, Expense>(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE date = $1 AND category = $2 ORDER BY date DESC, time DESC"
            ))
            .bind(date)
            .bind(category)
            .fetch_all(&db_pool)
            .await?
        }
        (Some(date), None) => {
            sqlx::query_as::<_, Expense>(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE date = $1 ORDER BY date DESC, time DESC"
            ))
            .bind(date)
            .fetch_all(&db_pool)
            .await?
        }
        (None, Some(category)) => {
            sqlx::query_as::<_, Expense>(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE category = $1 ORDER BY date DESC, time DESC"
            ))
            .bind(category)
            .fetch_all(&db_pool)
            .await?
        }
        (None, None) => {
            sqlx::query_as::<_, Expense>(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date DESC, time DESC"
            ))
            .fetch_all(&db_pool)
            .await?
        }
    };

    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}

// GET /expenses-summary?date= - Total plus per-category totals, largest first
pub async fn expenses_summary(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Result<Json<ExpensesSummaryResponse>, AppError> {
    let date_filter = params.get("date").and_then(|d| d.parse::<chrono::NaiveDate>().ok());

    let (total_expenses, rows) = match date_filter {
        Some(date) => {
            let total = sqlx::query_scalar::<_, Option<f64>>(
                "SELECT SUM(amount) FROM expenses WHERE date = $1",
            )
            .bind(date)
            .fetch_one(&db_pool)
            .await?;
            let rows = sqlx::query_as::<_, (String, f64)>(
                "SELECT category, SUM(amount) AS total FROM expenses WHERE date = $1
                 GROUP BY category ORDER BY total DESC",
            )
            .bind(date)
            .fetch_all(&db_pool)
            .await?;
            (total, rows)
        }
        None => {
            let total = sqlx::query_scalar::<_, Option<f64>>("SELECT SUM(amount) FROM expenses")
                .fetch_one(&db_pool)
                .await?;
            let rows = sqlx::query_as::<_, (String, f64)>(
                "SELECT category, SUM(amount) AS total FROM expenses
                 GROUP BY category ORDER BY total DESC",
            )
            .fetch_all(&db_pool)
            .await?;
            (total, rows)
        }
    };

    Ok(Json(ExpensesSummaryResponse {
        total_expenses: total_expenses.unwrap_or(0.0),
        by_category: rows
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect(),
    }))
}

// DELETE /delete-expense/:id
pub async fn delete_expense(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Expense not found"));
    }

    Ok(Json(StatusResponse::ok("Expense deleted successfully")))
}
