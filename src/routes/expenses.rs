use axum::{
    routing::{get, post, delete},
    Router,
};
use crate::handlers::expense::{add_expense, list_expenses, expenses_summary, delete_expense};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add-expense", post(add_expense))
        .route("/expenses", get(list_expenses))
        .route("/expenses-summary", get(expenses_summary))
        .route("/delete-expense/{id}", delete(delete_expense))
        .route_layer(axum::middleware::from_fn(require_auth))
}
