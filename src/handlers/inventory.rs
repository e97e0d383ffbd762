// src/handlers/inventory.rs
use axum::{
    extract::{Path, State},
    Json,
};
use crate::dtos::inventory::{AddEntryRequest, EntryResponse, ProductResponse, UpdateReorderRequest};
use crate::dtos::StatusResponse;
use crate::error::AppError;
use crate::ledger::{self, EntryKind};
use crate::models::product::Product;
use crate::state::AppState;
use tracing::instrument;

// GET /inventory - Current stock levels
#[instrument(skip(state))]
pub async fn get_inventory(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, quantity, reorder_level, price, brand FROM products ORDER BY name",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// POST /add-entry - Record an Intake or Supply movement
pub async fn add_entry(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<AddEntryRequest>,
) -> Result<Json<EntryResponse>, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() || req.quantity <= 0 {
        return Err(AppError::validation("Invalid name or quantity"));
    }

    let now = chrono::Local::now();
    let (date, time) = (now.date_naive(), now.time());
    let brand = req.brand.as_deref().map(str::trim).filter(|b| !b.is_empty());

    let mut tx = db_pool.begin().await?;

    let quantity = match req.kind {
        EntryKind::Intake => ledger::record_intake(&mut tx, &name, req.quantity, brand, date, time).await?,
        EntryKind::Supply => ledger::record_supply(&mut tx, &name, req.quantity, None, date, time).await?,
    };

    tx.commit().await?;

    Ok(Json(EntryResponse {
        success: true,
        message: format!("{} recorded successfully!", req.kind.as_str()),
        quantity,
    }))
}

// POST /update-reorder - Change a product's reorder threshold
pub async fn update_reorder(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<UpdateReorderRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let name = req.name.trim();
    if name.is_empty() || req.level < 0 {
        return Err(AppError::validation("Invalid input"));
    }

    let result = sqlx::query("UPDATE products SET reorder_level = $1 WHERE name = $2")
        .bind(req.level)
        .bind(name)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(StatusResponse::ok("Reorder level updated")))
}

// DELETE /delete-product/:id
pub async fn delete_product(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let name = sqlx::query_scalar::<_, String>("SELECT name FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    Ok(Json(StatusResponse::ok(format!("Product \"{name}\" deleted successfully"))))
}
