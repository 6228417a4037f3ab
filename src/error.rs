//! Facade error types.

use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use axum::http::method::InvalidMethod;
use axum::http::status::InvalidStatusCode;
use thiserror::Error;

/// Errors that can occur while operating on a wrapped HTTP message.
///
/// The facades add no validation of their own. Every variant except
/// [`MessageError::UnsupportedProtocolVersion`] wraps the error the
/// underlying `http` types produced, unchanged.
#[derive(Debug, Error)]
pub enum MessageError {
    /// Header name could not be parsed.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    /// Header value contains bytes a header value cannot carry.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    /// Status code outside the 100-999 range.
    #[error("invalid status code: {0}")]
    InvalidStatusCode(#[from] InvalidStatusCode),

    /// Request method could not be parsed.
    #[error("invalid method: {0}")]
    InvalidMethod(#[from] InvalidMethod),

    /// Protocol version string is not one the `http` crate models.
    #[error("unsupported protocol version: {0}")]
    UnsupportedProtocolVersion(String),

    /// JSON body encoding failed.
    #[error("JSON body encoding failed: {0}")]
    BodyEncoding(#[from] serde_json::Error),
}

/// Result type for facade operations.
pub type MessageResult<T> = Result<T, MessageError>;
