// src/dtos/inventory.rs
use serde::{Deserialize, Serialize};

use crate::ledger::EntryKind;
use crate::models::product::Product;

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub name: String,
    pub quantity: i32,
    pub brand: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReorderRequest {
    pub name: String,
    pub level: i32,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub reorder_level: i32,
    pub price: f64,
    pub brand: Option<String>,
    pub low_stock: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            reorder_level: product.reorder_level,
            price: product.price,
            brand: product.brand,
            low_stock: product.quantity <= product.reorder_level,
        }
    }
}

#[derive(Serialize)]
pub struct EntryResponse {
    pub success: bool,
    pub message: String,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i32, reorder_level: i32) -> Product {
        Product {
            id: 1,
            name: "Charger".to_string(),
            quantity,
            reorder_level,
            price: 1500.0,
            brand: None,
        }
    }

    #[test]
    fn low_stock_flags_at_or_below_reorder_level() {
        assert!(ProductResponse::from(product(5, 5)).low_stock);
        assert!(ProductResponse::from(product(0, 5)).low_stock);
        assert!(!ProductResponse::from(product(6, 5)).low_stock);
    }
}
