//! Webhook Types
//!
//! Errors raised while accepting a callback.

use axum::http::StatusCode;
use thiserror::Error;

/// Callback intake errors.
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("Missing X-Line-Signature header")]
    MissingSignature,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid callback payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl From<CallbackError> for (StatusCode, String) {
    fn from(err: CallbackError) -> Self {
        match err {
            CallbackError::MissingSignature | CallbackError::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            CallbackError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        }
    }
}
