use axum::{
    routing::{get, post, delete},
    Router,
};
use crate::handlers::inventory::{get_inventory, add_entry, update_reorder, delete_product};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(get_inventory))
        .route("/add-entry", post(add_entry))
        .route("/update-reorder", post(update_reorder))
        .route("/delete-product/{id}", delete(delete_product))
        .route_layer(axum::middleware::from_fn(require_auth))
}
