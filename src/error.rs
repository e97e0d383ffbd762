// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Database(sqlx::Error),
    InvalidInput(String),
    InsufficientStock(String),
    NegativeStockProjection(String),
    DuplicateName(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        AppError::InsufficientStock(msg.into())
    }

    pub fn negative_projection(msg: impl Into<String>) -> Self {
        AppError::NegativeStockProjection(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::DuplicateName(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn db(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::InsufficientStock(_)
            | AppError::NegativeStockProjection(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateName(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Database(e) => {
                tracing::error!(error=?e, "Database error");
                "Database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(%msg, "Internal error");
                "Internal server error".to_string()
            }
            AppError::InvalidInput(msg)
            | AppError::InsufficientStock(msg)
            | AppError::NegativeStockProjection(msg)
            | AppError::DuplicateName(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => msg.clone(),
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

/// Maps a Postgres unique violation onto the duplicate-name error, leaving
/// everything else as a database error.
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(AppError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::insufficient_stock("short").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::negative_projection("under").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("missing").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("dup").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::unauthorized("who").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("no").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::internal("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
