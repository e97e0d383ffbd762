use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;

// Selected with `type AS kind`; `type` stays the column name on disk.
#[derive(Debug, FromRow)]
pub struct StockTransaction {
    pub id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub kind: String,
    pub sale_num: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
}
