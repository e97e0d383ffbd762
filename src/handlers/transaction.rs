// src/handlers/transaction.rs
use axum::{
    extract::{Path, State},
    Json,
};
use crate::dtos::transaction::TransactionResponse;
use crate::dtos::StatusResponse;
use crate::error::AppError;
use crate::ledger;
use crate::models::stock_transaction::StockTransaction;
use crate::state::AppState;

const TXN_COLUMNS: &str = "id, item_name, quantity, type AS kind, sale_num, date, time";

// GET /transactions?date=&type= - Movement log, newest first
pub async fn list_transactions(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let date_filter = params.get("date").and_then(|d| d.parse::<chrono::NaiveDate>().ok());
    let type_filter = params
        .get("type")
        .filter(|t| t.as_str() != "All")
        .map(|t| t.to_string());

    let transactions = match (date_filter, type_filter) {
        (Some(date), Some(kind)) => {
            sqlx::query_as::<_, StockTransaction>(&format!(
                "SELECT {TXN_COLUMNS} FROM transactions WHERE date = $1 AND type = $2 ORDER BY time DESC"
            ))
            .bind(date)
            .bind(kind)
            .fetch_all(&db_pool)
            .await?
        }
        (Some(date), None) => {
            sqlx::query_as::<_, StockTransaction>(&format!(
                "SELECT {TXN_COLUMNS} FROM transactions WHERE date = $1 ORDER BY time DESC"
            ))
            .bind(date)
            .fetch_all(&db_pool)
            .await?
        }
        (None, Some(kind)) => {
            sqlx::query_as::<_, StockTransaction>(&format!(
                "SELECT {TXN_COLUMNS} FROM transactions WHERE type = $1 ORDER BY date DESC, time DESC LIMIT 100"
            ))
            .bind(kind)
            .fetch_all(&db_pool)
            .await?
        }
        (None, None) => {
            sqlx::query_as::<_, StockTransaction>(&format!(
                "SELECT {TXN_COLUMNS} FROM transactions ORDER BY date DESC, time DESC LIMIT 100"
            ))
            .fetch_all(&db_pool)
            .await?
        }
    };

    Ok(Json(transactions.into_iter().map(TransactionResponse::from).collect()))
}

// DELETE /delete-transaction/:id - Reverse the movement's stock effect, then remove it
pub async fn delete_transaction(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut tx = db_pool.begin().await?;

    let txn = sqlx::query_as::<_, StockTransaction>(&format!(
        "SELECT {TXN_COLUMNS} FROM transactions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    ledger::reverse_transaction(&mut tx, &txn).await?;

    tx.commit().await?;

    Ok(Json(StatusResponse::ok(format!(
        "Transaction deleted successfully. Inventory adjusted for \"{}\"",
        txn.item_name
    ))))
}
