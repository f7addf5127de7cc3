//! Crate-level error type and result alias.

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::template::TemplateError;

/// Errors surfaced by client operations.
///
/// Every variant aborts the in-flight batch operation; there is no partial
/// success at this layer. Per-item failures reported by the structured
/// dispatch contract are data, not errors, and never appear here.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed or contradictory request.
    #[error("validation error: {0}")]
    Validation(String),

    /// Template lookup, decode, or substitution failure.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Execution collaborator failure, propagated unchanged.
    #[error("transport failure in {operation}: {source}")]
    Transport {
        operation: String,
        #[source]
        source: ExecutorError,
    },

    /// The backend accepted a non-empty insert but reported zero created rows.
    #[error("{operation} reported zero created rows for a non-empty batch")]
    EmptyResult { operation: String },

    /// Response body did not match the operation's contract.
    #[error("malformed {operation} response: {detail}")]
    Protocol { operation: String, detail: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
