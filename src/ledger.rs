// src/ledger.rs
//
// Inventory ledger: every endpoint that moves stock goes through here.
// Operations run on a caller-provided transaction and lock the product
// rows they touch, so the projected-quantity checks hold at commit time.
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};

use crate::error::{map_unique_violation, AppError};
use crate::models::stock_transaction::StockTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryKind {
    #[default]
    Intake,
    Supply,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Intake => "Intake",
            EntryKind::Supply => "Supply",
        }
    }

    pub fn parse(s: &str) -> Option<EntryKind> {
        match s {
            "Intake" => Some(EntryKind::Intake),
            "Supply" => Some(EntryKind::Supply),
            _ => None,
        }
    }
}

/// Quantity after applying an entry. Supply may not take stock below zero.
pub fn project_apply(current: i32, kind: EntryKind, qty: i32) -> Result<i32, AppError> {
    match kind {
        EntryKind::Intake => Ok(current + qty),
        EntryKind::Supply => {
            let projected = current - qty;
            if projected < 0 {
                return Err(AppError::insufficient_stock("Insufficient stock"));
            }
            Ok(projected)
        }
    }
}

/// Quantity after undoing an entry: the inverse of `project_apply`.
pub fn project_reverse(current: i32, kind: EntryKind, qty: i32) -> Result<i32, AppError> {
    match kind {
        EntryKind::Intake => {
            let projected = current - qty;
            if projected < 0 {
                return Err(AppError::negative_projection(
                    "Cannot delete transaction - would result in negative inventory",
                ));
            }
            Ok(projected)
        }
        EntryKind::Supply => Ok(current + qty),
    }
}

pub struct SaleLine {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

pub struct PlannedLine {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub line_total: f64,
}

pub struct SalePlan {
    pub lines: Vec<PlannedLine>,
    pub total_amount: f64,
    pub final_quantities: HashMap<String, i32>,
}

/// Validates every line of a sale against a stock snapshot and computes the
/// resulting quantities and totals. Any invalid line fails the whole plan,
/// so nothing is applied for a sale that cannot complete. Duplicate names
/// deduct cumulatively.
pub fn plan_sale(stock: &HashMap<String, i32>, lines: &[SaleLine]) -> Result<SalePlan, AppError> {
    if lines.is_empty() {
        return Err(AppError::validation("Sale must contain at least one item"));
    }

    let mut remaining = stock.clone();
    let mut planned = Vec::with_capacity(lines.len());
    let mut total_amount = 0.0;

    for line in lines {
        let name = line.name.trim();
        if name.is_empty() || line.quantity <= 0 || line.price < 0.0 {
            return Err(AppError::validation("Invalid item data"));
        }

        let current = remaining
            .get_mut(name)
            .ok_or_else(|| AppError::insufficient_stock(format!("Insufficient stock for {name}")))?;
        if *current < line.quantity {
            return Err(AppError::insufficient_stock(format!("Insufficient stock for {name}")));
        }
        *current -= line.quantity;

        let line_total = line.quantity as f64 * line.price;
        total_amount += line_total;
        planned.push(PlannedLine {
            name: name.to_string(),
            quantity: line.quantity,
            price: line.price,
            line_total,
        });
    }

    Ok(SalePlan {
        lines: planned,
        total_amount,
        final_quantities: remaining,
    })
}

/// Reads a product's id and quantity under a row lock.
pub async fn lock_product(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> Result<Option<(i64, i32)>, AppError> {
    let row = sqlx::query_as::<_, (i64, i32)>(
        "SELECT id, quantity FROM products WHERE name = $1 FOR UPDATE",
    )
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row)
}

async fn set_quantity(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    quantity: i32,
) -> Result<(), AppError> {
    sqlx::query("UPDATE products SET quantity = $1 WHERE name = $2")
        .bind(quantity)
        .bind(name)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn log_movement(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    quantity: i32,
    kind: EntryKind,
    sale_num: Option<&str>,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO transactions (item_name, quantity, type, sale_num, date, time)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(name)
    .bind(quantity)
    .bind(kind.as_str())
    .bind(sale_num)
    .bind(date)
    .bind(time)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Adds stock, creating the product on first intake. Returns the new level.
pub async fn record_intake(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    qty: i32,
    brand: Option<&str>,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<i32, AppError> {
    if qty <= 0 {
        return Err(AppError::validation("Invalid name or quantity"));
    }

    let new_qty = match lock_product(tx, name).await? {
        Some((_, current)) => {
            let projected = project_apply(current, EntryKind::Intake, qty)?;
            set_quantity(tx, name, projected).await?;
            projected
        }
        None => {
            sqlx::query(
                "INSERT INTO products (name, quantity, reorder_level, brand)
                 VALUES ($1, $2, 5, $3)",
            )
            .bind(name)
            .bind(qty)
            .bind(brand)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_unique_violation(e, "Item name already exists"))?;
            qty
        }
    };

    log_movement(tx, name, qty, EntryKind::Intake, None, date, time).await?;
    Ok(new_qty)
}

/// Deducts stock. `sale_num` tags the movement when the deduction belongs
/// to a sale so that deleting the sale can find it again.
pub async fn record_supply(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    qty: i32,
    sale_num: Option<&str>,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<i32, AppError> {
    if qty <= 0 {
        return Err(AppError::validation("Invalid name or quantity"));
    }

    let (_, current) = lock_product(tx, name)
        .await?
        .ok_or_else(|| AppError::insufficient_stock("Item does not exist in stock"))?;

    let projected = project_apply(current, EntryKind::Supply, qty)?;
    set_quantity(tx, name, projected).await?;
    log_movement(tx, name, qty, EntryKind::Supply, sale_num, date, time).await?;
    Ok(projected)
}

/// Applies a validated plan: commits the new quantities, logs one tagged
/// Supply movement per line, and writes the sale header and items.
pub async fn record_sale(
    tx: &mut Transaction<'_, Postgres>,
    sale_num: &str,
    customer: &str,
    payment_status: &str,
    plan: &SalePlan,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<(), AppError> {
    for (name, quantity) in &plan.final_quantities {
        set_quantity(tx, name, *quantity).await?;
    }

    for line in &plan.lines {
        log_movement(tx, &line.name, line.quantity, EntryKind::Supply, Some(sale_num), date, time)
            .await?;
        sqlx::query(
            "INSERT INTO sale_items (sale_num, item_name, quantity, price, total)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(sale_num)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.price)
        .bind(line.line_total)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        "INSERT INTO sales (sale_num, customer, date, time, total_amount, payment_status)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(sale_num)
    .bind(customer)
    .bind(date)
    .bind(time)
    .bind(plan.total_amount)
    .bind(payment_status)
    .execute(&mut **tx)
    .await
    .map_err(|e| map_unique_violation(e, "Sale number already exists"))?;

    Ok(())
}

/// Undoes a logged movement and deletes it. Returns the adjusted quantity,
/// or None when the product no longer exists and only the log row goes.
pub async fn reverse_transaction(
    tx: &mut Transaction<'_, Postgres>,
    txn: &StockTransaction,
) -> Result<Option<i32>, AppError> {
    let kind = EntryKind::parse(&txn.kind)
        .ok_or_else(|| AppError::internal(format!("Unknown transaction type: {}", txn.kind)))?;

    let adjusted = match lock_product(tx, &txn.item_name).await? {
        Some((_, current)) => {
            let projected = project_reverse(current, kind, txn.quantity)?;
            set_quantity(tx, &txn.item_name, projected).await?;
            Some(projected)
        }
        None => None,
    };

    sqlx::query("DELETE FROM transactions WHERE id = $1")
        .bind(txn.id)
        .execute(&mut **tx)
        .await?;

    Ok(adjusted)
}

/// Returns every line item's quantity to its product (products deleted
/// since the sale are skipped), then removes the sale, its items, and the
/// Supply movements tagged with its number.
pub async fn reverse_sale(
    tx: &mut Transaction<'_, Postgres>,
    sale_num: &str,
) -> Result<(), AppError> {
    let items = sqlx::query_as::<_, (String, i32)>(
        "SELECT item_name, quantity FROM sale_items WHERE sale_num = $1",
    )
    .bind(sale_num)
    .fetch_all(&mut **tx)
    .await?;

    for (name, quantity) in &items {
        if let Some((_, current)) = lock_product(tx, name).await? {
            let restored = project_reverse(current, EntryKind::Supply, *quantity)?;
            set_quantity(tx, name, restored).await?;
        }
    }

    sqlx::query("DELETE FROM sale_items WHERE sale_num = $1")
        .bind(sale_num)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM sales WHERE sale_num = $1")
        .bind(sale_num)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM transactions WHERE type = 'Supply' AND sale_num = $1")
        .bind(sale_num)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn stock(entries: &[(&str, i32)]) -> HashMap<String, i32> {
        entries.iter().map(|(n, q)| (n.to_string(), *q)).collect()
    }

    fn line(name: &str, quantity: i32, price: f64) -> SaleLine {
        SaleLine { name: name.to_string(), quantity, price }
    }

    #[test]
    fn intake_adds_and_supply_subtracts() {
        assert_eq!(project_apply(10, EntryKind::Intake, 5).unwrap(), 15);
        assert_eq!(project_apply(10, EntryKind::Supply, 4).unwrap(), 6);
    }

    #[test]
    fn supply_never_goes_negative() {
        assert!(matches!(
            project_apply(3, EntryKind::Supply, 5),
            Err(AppError::InsufficientStock(_))
        ));
        // Draining to exactly zero is allowed
        assert_eq!(project_apply(5, EntryKind::Supply, 5).unwrap(), 0);
    }

    #[test]
    fn quantity_stays_non_negative_over_any_sequence() {
        let ops = [
            (EntryKind::Intake, 10),
            (EntryKind::Supply, 4),
            (EntryKind::Supply, 7), // rejected: would go to -1
            (EntryKind::Intake, 1),
            (EntryKind::Supply, 7),
        ];

        let mut quantity = 0;
        for (kind, qty) in ops {
            if let Ok(next) = project_apply(quantity, kind, qty) {
                quantity = next;
            }
            assert!(quantity >= 0);
        }
        assert_eq!(quantity, 0);
    }

    #[test]
    fn reversal_restores_pre_transaction_quantity() {
        let after_intake = project_apply(7, EntryKind::Intake, 5).unwrap();
        assert_eq!(project_reverse(after_intake, EntryKind::Intake, 5).unwrap(), 7);

        let after_supply = project_apply(7, EntryKind::Supply, 3).unwrap();
        assert_eq!(project_reverse(after_supply, EntryKind::Supply, 3).unwrap(), 7);
    }

    #[test]
    fn intake_then_supply_then_delete_supply_scenario() {
        // intake Widget 10 -> supply 4 -> quantity 6
        let q = project_apply(0, EntryKind::Intake, 10).unwrap();
        let q = project_apply(q, EntryKind::Supply, 4).unwrap();
        assert_eq!(q, 6);
        // deleting the supply transaction -> quantity 10
        assert_eq!(project_reverse(q, EntryKind::Supply, 4).unwrap(), 10);
    }

    #[test]
    fn intake_reversal_rejects_underflow() {
        // 2 on hand, reversing an intake of 5 would project -3
        assert!(matches!(
            project_reverse(2, EntryKind::Intake, 5),
            Err(AppError::NegativeStockProjection(_))
        ));
    }

    #[test]
    fn plan_sale_computes_totals_and_final_quantities() {
        let stock = stock(&[("Charger", 10), ("Case", 4)]);
        let plan = plan_sale(
            &stock,
            &[line("Charger", 2, 1500.0), line("Case", 1, 800.0)],
        )
        .unwrap();

        assert_eq!(plan.total_amount, 3800.0);
        assert_eq!(plan.lines.len(), 2);
        assert_eq!(plan.lines[0].line_total, 3000.0);
        assert_eq!(plan.final_quantities["Charger"], 8);
        assert_eq!(plan.final_quantities["Case"], 3);
    }

    #[test]
    fn plan_sale_fails_wholesale_when_any_line_is_short() {
        let stock = stock(&[("Charger", 10), ("Case", 0)]);
        let result = plan_sale(
            &stock,
            &[line("Charger", 2, 1500.0), line("Case", 1, 800.0)],
        );

        // The first line was fine, but the plan (and with it every
        // mutation) is rejected because the second ran out.
        assert!(matches!(result, Err(AppError::InsufficientStock(_))));
    }

    #[test]
    fn plan_sale_rejects_unknown_products() {
        let stock = stock(&[("Charger", 10)]);
        let result = plan_sale(&stock, &[line("Earbuds", 1, 2000.0)]);
        assert!(matches!(result, Err(AppError::InsufficientStock(_))));
    }

    #[test]
    fn plan_sale_deducts_duplicate_names_cumulatively() {
        let stock = stock(&[("Charger", 5)]);
        let plan = plan_sale(
            &stock,
            &[line("Charger", 3, 1500.0), line("Charger", 2, 1400.0)],
        )
        .unwrap();
        assert_eq!(plan.final_quantities["Charger"], 0);

        let result = plan_sale(
            &stock,
            &[line("Charger", 3, 1500.0), line("Charger", 3, 1400.0)],
        );
        assert!(matches!(result, Err(AppError::InsufficientStock(_))));
    }

    #[test]
    fn plan_sale_validates_line_shape() {
        let stock = stock(&[("Charger", 5)]);
        assert!(plan_sale(&stock, &[]).is_err());
        assert!(plan_sale(&stock, &[line("", 1, 10.0)]).is_err());
        assert!(plan_sale(&stock, &[line("Charger", 0, 10.0)]).is_err());
        assert!(plan_sale(&stock, &[line("Charger", 1, -1.0)]).is_err());
    }

    #[test]
    fn entry_kind_round_trips_through_strings() {
        assert_eq!(EntryKind::parse("Intake"), Some(EntryKind::Intake));
        assert_eq!(EntryKind::parse("Supply"), Some(EntryKind::Supply));
        assert_eq!(EntryKind::parse("supply"), None);
        assert_eq!(EntryKind::Intake.as_str(), "Intake");
        assert_eq!(EntryKind::Supply.as_str(), "Supply");
    }
}
