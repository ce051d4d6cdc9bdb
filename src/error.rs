//! Route-level failures and the status codes they surface as.

use thiserror::Error;

use crate::http::response::StatusCode;

/// Errors a route handler can produce.
///
/// None of these reach the connection: the router turns each into a
/// response with [`HandlerError::status`].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("resource not found")]
    NotFound,

    #[error("method not allowed on this route")]
    MethodNotAllowed,

    /// No serving directory configured. Reported as 404.
    #[error("no serving directory configured")]
    MissingConfiguration,

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::NotFound | HandlerError::MissingConfiguration => StatusCode::NotFound,
            HandlerError::MethodNotAllowed => StatusCode::MethodNotAllowed,
            HandlerError::Io(_) => StatusCode::InternalServerError,
        }
    }
}
