use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Sale {
    pub id: i64,
    pub sale_num: String,
    pub customer: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub total_amount: f64,
    pub payment_status: String,
}

#[derive(Debug, FromRow)]
pub struct SaleItem {
    pub id: i64,
    pub sale_num: String,
    pub item_name: String,
    pub quantity: i32,
    pub price: f64,
    pub total: f64,
}
