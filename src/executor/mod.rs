//! Execution collaborator seam.
//!
//! The client never speaks a wire protocol itself: every backend interaction
//! goes through [`Executor`] as a named query or mutation. Transport concerns
//! (HTTP, auth headers, retries, timeouts) live behind this trait, as do the
//! prepared operation documents the names refer to.

use async_trait::async_trait;
use thiserror::Error;

/// Whether a named operation reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Failure raised by an executor implementation.
///
/// Opaque to the client: it is propagated unchanged, wrapped with the name of
/// the operation that was in flight. No retry happens at this layer.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ExecutorError(pub String);

impl ExecutorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Abstract query/mutation execution against the backing store.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute one named operation with the given variables and return the
    /// raw response body.
    async fn execute(
        &self,
        kind: OperationKind,
        operation: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ExecutorError>;
}
