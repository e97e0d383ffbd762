// src/dtos/sale.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::sale::{Sale, SaleItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Credit,
    Partial,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Credit => "Credit",
            PaymentStatus::Partial => "Partial",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentStatus> {
        match s {
            "Pending" => Some(PaymentStatus::Pending),
            "Paid" => Some(PaymentStatus::Paid),
            "Credit" => Some(PaymentStatus::Credit),
            "Partial" => Some(PaymentStatus::Partial),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateSaleRequest {
    pub customer: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub items: Vec<SaleItemRequest>,
}

#[derive(Deserialize)]
pub struct SaleItemRequest {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct UpdateSaleStatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct CreateSaleResponse {
    pub success: bool,
    pub message: String,
    pub sale_num: String,
    pub total: f64,
}

#[derive(Serialize)]
pub struct SaleResponse {
    pub id: i64,
    pub sale_num: String,
    pub customer: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub total_amount: f64,
    pub payment_status: String,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            id: sale.id,
            sale_num: sale.sale_num,
            customer: sale.customer,
            date: sale.date,
            time: sale.time,
            total_amount: sale.total_amount,
            payment_status: sale.payment_status,
        }
    }
}

#[derive(Serialize)]
pub struct SaleItemResponse {
    pub id: i64,
    pub sale_num: String,
    pub item_name: String,
    pub quantity: i32,
    pub price: f64,
    pub total: f64,
}

impl From<SaleItem> for SaleItemResponse {
    fn from(item: SaleItem) -> Self {
        Self {
            id: item.id,
            sale_num: item.sale_num,
            item_name: item.item_name,
            quantity: item.quantity,
            price: item.price,
            total: item.total,
        }
    }
}

#[derive(Serialize)]
pub struct SaleDetailResponse {
    pub sale: SaleResponse,
    pub items: Vec<SaleItemResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_parses_exactly_the_valid_set() {
        assert_eq!(PaymentStatus::parse("Pending"), Some(PaymentStatus::Pending));
        assert_eq!(PaymentStatus::parse("Paid"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::parse("Credit"), Some(PaymentStatus::Credit));
        assert_eq!(PaymentStatus::parse("Partial"), Some(PaymentStatus::Partial));
        assert_eq!(PaymentStatus::parse("paid"), None);
        assert_eq!(PaymentStatus::parse("Refunded"), None);
    }

    #[test]
    fn payment_status_defaults_to_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::default().as_str(), "Pending");
    }
}
