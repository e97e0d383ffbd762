use axum::{
    routing::{get, delete},
    Router,
};
use crate::handlers::transaction::{list_transactions, delete_transaction};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/delete-transaction/{id}", delete(delete_transaction))
        .route_layer(axum::middleware::from_fn(require_auth))
}
