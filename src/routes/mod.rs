pub mod inventory;
pub mod transactions;
pub mod sales;
pub mod invoices;
pub mod expenses;
pub mod reports;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(inventory::routes())
        .merge(transactions::routes())
        .merge(sales::routes())
        .merge(invoices::routes())
        .merge(expenses::routes())
        .merge(reports::routes())
        .merge(users::routes())
}
