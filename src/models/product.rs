use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub reorder_level: i32,
    pub price: f64,
    pub brand: Option<String>,
}
