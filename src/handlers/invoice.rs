// src/handlers/invoice.rs
use axum::{
    extract::{Path, State},
    Json,
};
use axum::http::StatusCode;
use crate::dtos::invoice::{
    BusinessInfo, GenerateInvoiceRequest, InvoiceDocument, InvoiceLine, InvoiceResponse,
};
use crate::error::{map_unique_violation, AppError};
use crate::ledger;
use crate::models::sale::SaleItem;
use crate::state::AppState;

// POST /generate-invoice
//
// Quick single-item order: deducts stock through the ledger, logs the
// Supply movement, records the invoice header, and hands back the
// document for the external renderer.
pub async fn generate_invoice(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<GenerateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), AppError> {
    let customer = req.customer.trim().to_string();
    let item = req.item.trim().to_string();
    if customer.is_empty() || item.is_empty() || req.quantity <= 0 {
        return Err(AppError::validation("Invalid input"));
    }

    let now = chrono::Local::now();
    let (date, time) = (now.date_naive(), now.time());
    let invoice_num = format!("INV-{}", now.format("%Y%m%d%H%M%S"));

    let mut tx = db_pool.begin().await?;

    ledger::record_supply(&mut tx, &item, req.quantity, None, date, time).await?;

    let price = sqlx::query_scalar::<_, f64>("SELECT price FROM products WHERE name = $1")
        .bind(&item)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO invoices (invoice_num, date, customer, total_items) VALUES ($1, $2, $3, $4)",
    )
    .bind(&invoice_num)
    .bind(date)
    .bind(&customer)
    .bind(req.quantity)
    .execute(&mut *tx)
    .await
    .map_err(|e| map_unique_violation(e, "Invoice number already exists"))?;

    tx.commit().await?;

    let total = req.quantity as f64 * price;
    let message = format!("Invoice {invoice_num} generated");

    Ok((
        StatusCode::CREATED,
        Json(InvoiceResponse {
            success: true,
            message,
            invoice: InvoiceDocument {
                invoice_num,
                business: BusinessInfo::from_env(),
                customer,
                date,
                lines: vec![InvoiceLine {
                    item_name: item,
                    quantity: req.quantity,
                    price,
                    total,
                }],
                total_amount: total,
                payment_status: None,
            },
        }),
    ))
}

// GET /generate-sale-invoice/:sale_num - Read-only document for an existing sale
pub async fn generate_sale_invoice(
    Path(sale_num): Path<String>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let sale = crate::handlers::sale::fetch_sale(&db_pool, &sale_num).await?;

    let items = sqlx::query_as::<_, SaleItem>(
        "SELECT id, sale_num, item_name, quantity, price, total
         FROM sale_items WHERE sale_num = $1 ORDER BY id",
    )
    .bind(&sale_num)
    .fetch_all(&db_pool)
    .await?;

    let lines = items
        .into_iter()
        .map(|item| InvoiceLine {
            item_name: item.item_name,
            quantity: item.quantity,
            price: item.price,
            total: item.total,
        })
        .collect();

    Ok(Json(InvoiceResponse {
        success: true,
        message: format!("Invoice for sale {sale_num}"),
        invoice: InvoiceDocument {
            invoice_num: sale.sale_num,
            business: BusinessInfo::from_env(),
            customer: sale.customer,
            date: sale.date,
            lines,
            total_amount: sale.total_amount,
            payment_status: Some(sale.payment_status),
        },
    }))
}
