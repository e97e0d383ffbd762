// src/dtos/expense.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;

#[derive(Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description,
            category: expense.category,
            amount: expense.amount,
            date: expense.date,
            time: expense.time,
            notes: expense.notes,
        }
    }
}

#[derive(Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Serialize)]
pub struct ExpensesSummaryResponse {
    pub total_expenses: f64,
    pub by_category: Vec<CategoryTotal>,
}
