use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Job with ID {0} not found")]
    NotFound(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("{0}")]
    Validation(String),
    #[error("already exists: {0}")]
    Duplicate(String),
    #[error("store failure: {0}")]
    Store(sqlx::Error),
    #[error("migration failure: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "ERR-JOB-404",
            AppError::InvalidCategory(_) => "ERR-TAG-400",
            AppError::Validation(_) => "ERR-REQ-422",
            AppError::Duplicate(_) => "ERR-DB-409",
            AppError::Store(_) | AppError::Migrate(_) => "ERR-DB-500",
            AppError::Io(_) | AppError::Json(_) => "ERR-SYS-500",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// constraint violations on create paths are client errors, not store failures
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Validation(db_err.message().to_string());
            }
        }
        AppError::Store(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            tracing::error!(code = self.code(), "request failed: {}", &self);
            "internal server error".to_string()
        } else {
            tracing::debug!(code = self.code(), "request rejected: {}", &self);
            self.to_string()
        };
        (status, Json(json!({"code": self.code(), "detail": detail}))).into_response()
    }
}
