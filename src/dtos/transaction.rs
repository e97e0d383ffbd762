// src/dtos/transaction.rs
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::stock_transaction::StockTransaction;

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub item_name: String,
    pub quantity: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub sale_num: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl From<StockTransaction> for TransactionResponse {
    fn from(txn: StockTransaction) -> Self {
        Self {
            id: txn.id,
            item_name: txn.item_name,
            quantity: txn.quantity,
            kind: txn.kind,
            sale_num: txn.sale_num,
            date: txn.date,
            time: txn.time,
        }
    }
}
