use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::invoice::{generate_invoice, generate_sale_invoice};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate-invoice", post(generate_invoice))
        .route("/generate-sale-invoice/{sale_num}", get(generate_sale_invoice))
        .route_layer(axum::middleware::from_fn(require_auth))
}
