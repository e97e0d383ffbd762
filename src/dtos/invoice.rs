// src/dtos/invoice.rs
//
// Invoice documents are the data an external PDF renderer consumes; the
// byte stream itself is not produced here.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct GenerateInvoiceRequest {
    pub customer: String,
    pub item: String,
    pub quantity: i32,
}

#[derive(Serialize)]
pub struct BusinessInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl BusinessInfo {
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("BUSINESS_NAME").unwrap_or_else(|_| "ShopTrack".to_string()),
            address: std::env::var("BUSINESS_ADDRESS").unwrap_or_default(),
            phone: std::env::var("BUSINESS_PHONE").unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
pub struct InvoiceLine {
    pub item_name: String,
    pub quantity: i32,
    pub price: f64,
    pub total: f64,
}

#[derive(Serialize)]
pub struct InvoiceDocument {
    pub invoice_num: String,
    pub business: BusinessInfo,
    pub customer: String,
    pub date: NaiveDate,
    pub lines: Vec<InvoiceLine>,
    pub total_amount: f64,
    pub payment_status: Option<String>,
}

#[derive(Serialize)]
pub struct InvoiceResponse {
    pub success: bool,
    pub message: String,
    pub invoice: InvoiceDocument,
}
