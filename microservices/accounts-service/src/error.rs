//! Error types for the Accounts Service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bankline_store::StoreError;
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Lookup failures.
///
/// `AccountNotFound` is the only business outcome; it carries the account
/// number or owner fragment that matched nothing. Everything else is an
/// infrastructure failure and maps to a 5xx.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::AccountNotFound(_))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::AccountNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Store(_) => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
