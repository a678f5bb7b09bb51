use thiserror::Error;

use super::OperationKind;
use crate::store_framework::FrameworkError;

/// Failure value stored in state and returned from every product operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    /// Displays as the server's own message.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Product validation error: {0}")]
    Validation(String),
    #[error("Unexpected reply for {0} request")]
    UnexpectedReply(OperationKind),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for ProductError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProductError::Timeout;
        }
        if err.is_decode() {
            return ProductError::Decode(err.to_string());
        }
        ProductError::Network(err.to_string())
    }
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        ProductError::ActorCommunicationError(err.to_string())
    }
}
