use axum::{Router, routing::{post, get, put, delete}, middleware};
use crate::handlers::user::{
    login, logout, current_user, list_users, create_user, update_user,
    toggle_user_active, change_password, delete_user,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout));

    let protected = Router::new()
        .route("/current-user", get(current_user))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/users/{id}/toggle-active", post(toggle_user_active))
        .route("/users/{id}/change-password", post(change_password))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
