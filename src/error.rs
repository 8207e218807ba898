//! Error types for the record server
//!
//! Provides unified error handling using thiserror. Each variant maps to one
//! branch of the response taxonomy: everything except `Transport` becomes an
//! ERROR response on the wire; `Transport` is fatal to its session only and
//! produces no response.

use thiserror::Error;

use crate::store::StoreError;

// == Server Error Enum ==
/// Unified error type for the request pipeline.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Username/password pair did not match a directory entry
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Token missing, malformed, badly signed, or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token is valid but the role is not allowed to run the command
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Identifier has no matching record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Undecodable payload or unknown command tag
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The record store reported a failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Read/write failure on the client connection
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Returns true when the error must tear the session down instead of
    /// being reported to the client as an ERROR response.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ServerError::Transport(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the record server.
pub type Result<T> = std::result::Result<T, ServerError>;
