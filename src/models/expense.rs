use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}
