use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// The store rejected or could not service a query. `action` names the
    /// operation ("fetch opportunities", "update proposal draft", ...) so the
    /// caller sees which round trip failed.
    Store {
        action: &'static str,
        source: rusqlite::Error,
    },
    Pool(r2d2::Error),
    Invalid(String),
    NotFound,
}

impl AppError {
    pub fn store(action: &'static str, source: rusqlite::Error) -> Self {
        AppError::Store { action, source }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store { action, source } => write!(f, "Failed to {action}: {source}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Invalid(msg) => write!(f, "Invalid request: {msg}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" }))
            }
            AppError::Invalid(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "internal server error" }))
            }
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}
