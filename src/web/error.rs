//! Mapping of failures to HTTP responses.

use axum::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::ValidationError;
use crate::store::StoreError;

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render page: {0}")]
    Template(#[from] minijinja::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WebError::Store(err) if !err.is_recoverable() => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            WebError::Store(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        // Internal details stay in the log.
        let message = if status.is_server_error() {
            "Something went wrong.".to_string()
        } else {
            self.to_string()
        };
        let body = format!("{status}: {message}");
        (status, Extension(ErrorPage { status, message }), body).into_response()
    }
}

/// Status and message of a failed request, attached to the response so the
/// router can render the error page with its templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}
