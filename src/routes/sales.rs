use axum::{
    routing::{get, post, delete},
    Router,
};
use crate::handlers::sale;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-sale", post(sale::create_sale))
        .route("/sales", get(sale::list_sales))
        .route("/sale/{sale_num}", get(sale::get_sale))
        .route("/update-sale-status/{sale_num}", post(sale::update_sale_status))
        .route("/delete-sale/{sale_num}", delete(sale::delete_sale))
        .route_layer(axum::middleware::from_fn(require_auth))
}
