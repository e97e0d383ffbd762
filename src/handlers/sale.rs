// src/handlers/sale.rs
use std::collections::{BTreeSet, HashMap};

use axum::{
    extract::{Path, State},
    Json,
};
use axum::http::StatusCode;
use crate::dtos::sale::{
    CreateSaleRequest, CreateSaleResponse, PaymentStatus, SaleDetailResponse, SaleItemResponse,
    SaleResponse, UpdateSaleStatusRequest,
};
use crate::dtos::StatusResponse;
use crate::error::AppError;
use crate::ledger::{self, SaleLine};
use crate::models::sale::{Sale, SaleItem};
use crate::state::AppState;

const SALE_COLUMNS: &str = "id, sale_num, customer, date, time, total_amount, payment_status";

// POST /create-sale
//
// Validates every line against a locked stock snapshot before anything is
// written, so a sale that cannot complete leaves no trace.
pub async fn create_sale(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<CreateSaleResponse>), AppError> {
    let customer = req.customer.trim().to_string();
    if customer.is_empty() || req.items.is_empty() {
        return Err(AppError::validation("Customer and items required"));
    }

    let lines: Vec<SaleLine> = req
        .items
        .iter()
        .map(|item| SaleLine {
            name: item.name.trim().to_string(),
            quantity: item.quantity,
            price: item.price,
        })
        .collect();

    let now = chrono::Local::now();
    let (date, time) = (now.date_naive(), now.time());
    let sale_num = format!("SALE-{}", now.format("%Y%m%d%H%M%S"));

    let mut tx = db_pool.begin().await?;

    // Lock the affected products in name order and snapshot their stock
    let names: BTreeSet<&str> = lines.iter().map(|l| l.name.as_str()).collect();
    let mut stock = HashMap::new();
    for name in names {
        if let Some((_, quantity)) = ledger::lock_product(&mut tx, name).await? {
            stock.insert(name.to_string(), quantity);
        }
    }

    let plan = ledger::plan_sale(&stock, &lines)?;
    ledger::record_sale(&mut tx, &sale_num, &customer, req.payment_status.as_str(), &plan, date, time)
        .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSaleResponse {
            success: true,
            message: "Sale created successfully".to_string(),
            sale_num,
            total: plan.total_amount,
        }),
    ))
}

// GET /sales?customer=&date=
pub async fn list_sales(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let customer_filter = params
        .get("customer")
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| format!("%{c}%"));
    let date_filter = params.get("date").and_then(|d| d.parse::<chrono::NaiveDate>().ok());

    let sales = match (customer_filter, date_filter) {
        (Some(customer), Some(date)) => {
            sqlx::query_as::<_, Sale>(&format!(
                "SELECT {SALE_COLUMNS} FROM sales WHERE customer LIKE $1 AND date = $2 ORDER BY date DESC, time DESC"
            ))
            .bind(customer)
            .bind(date)
            .fetch_all(&db_pool)
            .await?
        }
        (None, Some(date)) => {
            sqlx::query_as::<_, Sale>(&format!(
                "SELECT {SALE_COLUMNS} FROM sales WHERE date = $1 ORDER BY date DESC, time DESC"
            ))
            .bind(date)
            .fetch_all(&db_pool)
            .await?
        }
        (Some(customer), None) => {
            sqlx::query_as::<_, Sale>(&format!(
                "SELECT {SALE_COLUMNS} FROM sales WHERE customer LIKE $1 ORDER BY date DESC, time DESC"
            ))
            .bind(customer)
            .fetch_all(&db_pool)
            .await?
        }
        (None, None) => {
            sqlx::query_as::<_, Sale>(&format!(
                "SELECT {SALE_COLUMNS} FROM sales ORDER BY date DESC, time DESC LIMIT 100"
            ))
            .fetch_all(&db_pool)
            .await?
        }
    };

    Ok(Json(sales.into_iter().map(SaleResponse::from).collect()))
}

// GET /sale/:sale_num - Header plus line items
pub async fn get_sale(
    Path(sale_num): Path<String>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<SaleDetailResponse>, AppError> {
    let sale = fetch_sale(&db_pool, &sale_num).await?;

    let items = sqlx::query_as::<_, SaleItem>(
        "SELECT id, sale_num, item_name, quantity, price, total
         FROM sale_items WHERE sale_num = $1 ORDER BY id",
    )
    .bind(&sale_num)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(SaleDetailResponse {
        sale: SaleResponse::from(sale),
        items: items.into_iter().map(SaleItemResponse::from).collect(),
    }))
}

// POST /update-sale-status/:sale_num
pub async fn update_sale_status(
    Path(sale_num): Path<String>,
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<UpdateSaleStatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let status = PaymentStatus::parse(req.status.trim())
        .ok_or_else(|| AppError::validation("Invalid payment status"))?;

    let result = sqlx::query("UPDATE sales SET payment_status = $1 WHERE sale_num = $2")
        .bind(status.as_str())
        .bind(&sale_num)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Sale not found"));
    }

    Ok(Json(StatusResponse::ok(format!(
        "Payment status updated to {}",
        status.as_str()
    ))))
}

// DELETE /delete-sale/:sale_num - Restore stock, remove the sale and its movements
pub async fn delete_sale(
    Path(sale_num): Path<String>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut tx = db_pool.begin().await?;

    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sales WHERE sale_num = $1)")
        .bind(&sale_num)
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Err(AppError::not_found("Sale not found"));
    }

    ledger::reverse_sale(&mut tx, &sale_num).await?;

    tx.commit().await?;

    Ok(Json(StatusResponse::ok(format!(
        "Sale {sale_num} deleted successfully. Inventory reversed."
    ))))
}

pub(crate) async fn fetch_sale(db_pool: &sqlx::PgPool, sale_num: &str) -> Result<Sale, AppError> {
    sqlx::query_as::<_, Sale>(&format!("SELECT {SALE_COLUMNS} FROM sales WHERE sale_num = $1"))
        .bind(sale_num)
        .fetch_optional(db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Sale not found"))
}
