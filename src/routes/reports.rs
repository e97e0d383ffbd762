use axum::{routing::get, Router};
use crate::handlers::report::{sales_summary, dashboard_metrics};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales-summary", get(sales_summary))
        .route("/dashboard-metrics", get(dashboard_metrics))
        .route_layer(axum::middleware::from_fn(require_auth))
}
