// src/handlers/user.rs
use bcrypt::{hash, verify, DEFAULT_COST};
use crate::auth::jwt::{sign_token, TOKEN_LIFETIME_SECONDS};
use crate::dtos::user::{
    ChangePasswordRequest, CreateUserRequest, CreateUserResponse, LoginRequest, LoginResponse,
    UpdateUserRequest, UserResponse,
};
use crate::dtos::StatusResponse;
use crate::error::{map_unique_violation, AppError};
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use crate::state::AppState;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::Json;

const USER_COLUMNS: &str = "id, username, password_hash, full_name, email, role, is_active, created_at";

const VALID_ROLES: [&str; 3] = ["admin", "manager", "staff"];

// POST /login
pub async fn login(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Username and password required"));
    }

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(AppError::unauthorized("Account is disabled"));
    }

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;
    let token = sign_token(user.id, &user.role, &user.username, &secret)?;

    Ok(Json(LoginResponse {
        success: true,
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_LIFETIME_SECONDS,
        user: UserResponse::from(user),
    }))
}

// POST /logout - Tokens are stateless; the client just drops its copy
pub async fn logout() -> Json<StatusResponse> {
    Json(StatusResponse::ok("Logged out"))
}

// GET /current-user
pub async fn current_user(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = fetch_user(&db_pool, auth.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

// GET /users (admin only)
pub async fn list_users(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    auth.require_admin()?;

    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// POST /users (admin only)
pub async fn create_user(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), AppError> {
    auth.require_admin()?;

    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Username and password required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password must be at least 6 characters"));
    }

    let role = payload.role.as_deref().unwrap_or("staff");
    if !VALID_ROLES.contains(&role) {
        return Err(AppError::validation("Invalid role"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash, full_name, email, role)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(payload.full_name.as_deref())
    .bind(payload.email.as_deref())
    .bind(role)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Username already exists"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            success: true,
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}

// PUT /users/:id (admin only) - Partial update of profile fields
pub async fn update_user(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    auth.require_admin()?;

    if payload.full_name.is_none() && payload.email.is_none() && payload.role.is_none() {
        return Err(AppError::validation("No fields to update"));
    }
    if let Some(role) = payload.role.as_deref() {
        if !VALID_ROLES.contains(&role) {
            return Err(AppError::validation("Invalid role"));
        }
    }

    let result = sqlx::query(
        "UPDATE users SET
            full_name = COALESCE($1, full_name),
            email = COALESCE($2, email),
            role = COALESCE($3, role)
         WHERE id = $4",
    )
    .bind(payload.full_name.as_deref())
    .bind(payload.email.as_deref())
    .bind(payload.role.as_deref())
    .bind(id)
    .execute(&db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User not found"));
    }

    Ok(Json(StatusResponse::ok("User updated successfully")))
}

// POST /users/:id/toggle-active (admin only)
pub async fn toggle_user_active(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<StatusResponse>, AppError> {
    auth.require_admin()?;

    if id == auth.user_id {
        return Err(AppError::validation("Cannot deactivate your own account"));
    }

    let was_active = sqlx::query_scalar::<_, bool>("SELECT is_active FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    sqlx::query("UPDATE users SET is_active = $1 WHERE id = $2")
        .bind(!was_active)
        .bind(id)
        .execute(&db_pool)
        .await?;

    let status_text = if was_active { "deactivated" } else { "activated" };
    Ok(Json(StatusResponse::ok(format!("User {status_text} successfully"))))
}

// POST /users/:id/change-password - Self service, or admin for anyone
pub async fn change_password(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let changing_own = id == auth.user_id;
    if !changing_own {
        auth.require_admin()?;
    }

    if payload.new_password.len() < 6 {
        return Err(AppError::validation("Password must be at least 6 characters"));
    }

    let password_hash = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    if changing_own {
        let current = payload
            .current_password
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("Current password is incorrect"))?;
        let ok = verify(current, &password_hash)
            .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
        if !ok {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }
    }

    let new_hash = hash(&payload.new_password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(new_hash)
        .bind(id)
        .execute(&db_pool)
        .await?;

    Ok(Json(StatusResponse::ok("Password changed successfully")))
}

// DELETE /users/:id (admin only)
pub async fn delete_user(
    Path(id): Path<i64>,
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<StatusResponse>, AppError> {
    auth.require_admin()?;

    if id == auth.user_id {
        return Err(AppError::validation("Cannot delete your own account"));
    }

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User not found"));
    }

    Ok(Json(StatusResponse::ok("User deleted successfully")))
}

async fn fetch_user(db_pool: &sqlx::PgPool, id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}
