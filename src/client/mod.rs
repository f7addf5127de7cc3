//! Dispatch and cancellation orchestration.
//!
//! Every method is a single request/response cycle against the execution
//! collaborator; the client holds no state between calls and performs no
//! chunking or retry of its own.

mod types;

pub use types::{DeliveryOutcome, DispatchReport, DispatchResult};

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::compose::Composer;
use crate::config::{ClientConfig, DispatchMode};
use crate::error::{ClientError, Result};
use crate::executor::{Executor, OperationKind};
use crate::filter::Filter;
use crate::notification::NotificationRequest;
use crate::template::TemplateResolver;

pub(crate) const OP_CREATE_NOTIFICATIONS: &str = "CreateNotifications";
pub(crate) const OP_SEND_NOTIFICATIONS: &str = "SendNotifications";
pub(crate) const OP_CANCEL_NOTIFICATIONS: &str = "CancelNotifications";

/// Client for composing, dispatching, and cancelling notifications.
pub struct Client {
    executor: Arc<dyn Executor>,
    resolver: TemplateResolver,
    config: ClientConfig,
}

impl Client {
    /// Client with the default configuration (structured-report contract).
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self::with_config(executor, ClientConfig::default())
    }

    pub fn with_config(executor: Arc<dyn Executor>, config: ClientConfig) -> Self {
        let resolver = TemplateResolver::new(executor.clone());
        Self {
            executor,
            resolver,
            config,
        }
    }

    /// Template lookup and upsert operations.
    pub fn templates(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Compose and dispatch a batch of notifications in one backend mutation.
    ///
    /// An empty batch returns an empty result without touching the backend.
    /// Template resolution failures abort the whole batch before anything is
    /// submitted; per-item failures reported by the structured contract do
    /// not. Chunking, if needed, is the caller's responsibility.
    pub async fn send(
        &self,
        requests: Vec<NotificationRequest>,
        variables: Option<&Value>,
    ) -> Result<DispatchResult> {
        if requests.is_empty() {
            return Ok(self.empty_result());
        }

        let composer = Composer::new(&self.resolver, self.config.dispatch_mode.compose_mode());
        let batch = composer.compose(requests, variables).await?;
        if batch.is_empty() {
            // Legacy normalization may have dropped every item.
            return Ok(self.empty_result());
        }

        debug!(
            count = batch.len(),
            mode = ?self.config.dispatch_mode,
            "dispatching notification batch"
        );

        match self.config.dispatch_mode {
            DispatchMode::FlatIds => {
                let response = self
                    .execute(
                        OperationKind::Mutation,
                        OP_CREATE_NOTIFICATIONS,
                        json!({ "objects": batch }),
                    )
                    .await?;

                let ids = created_ids(&response)?;
                if ids.is_empty() {
                    return Err(ClientError::EmptyResult {
                        operation: OP_CREATE_NOTIFICATIONS.to_string(),
                    });
                }
                Ok(DispatchResult::Created(ids))
            }
            DispatchMode::Report => {
                let response = self
                    .execute(
                        OperationKind::Mutation,
                        OP_SEND_NOTIFICATIONS,
                        json!({ "objects": batch }),
                    )
                    .await?;

                let raw = response.pointer("/send_notifications").cloned().ok_or_else(
                    || ClientError::Protocol {
                        operation: OP_SEND_NOTIFICATIONS.to_string(),
                        detail: "missing send_notifications in response".to_string(),
                    },
                )?;
                let report: DispatchReport =
                    serde_json::from_value(raw).map_err(|err| ClientError::Protocol {
                        operation: OP_SEND_NOTIFICATIONS.to_string(),
                        detail: err.to_string(),
                    })?;
                Ok(DispatchResult::Report(report))
            }
        }
    }

    /// Cancel not-yet-dispatched notifications correlated to a subject
    /// reference. An empty `subject_type` scopes by id alone.
    pub async fn cancel_by_subject(&self, subject_type: &str, subject_id: &str) -> Result<u64> {
        self.cancel(Filter::subject(subject_type, subject_id)).await
    }

    /// Cancel every notification matching `filter` in one atomic bulk update,
    /// closing and hiding the rows. Returns the backend-reported affected-row
    /// count. No read-then-write: ordering and atomicity come entirely from
    /// the backend.
    pub async fn cancel(&self, filter: Filter) -> Result<u64> {
        if filter.is_empty() {
            // An empty predicate would close every pending row in the store.
            return Err(ClientError::Validation(
                "refusing to cancel with an empty filter".to_string(),
            ));
        }

        let variables = json!({
            "where": filter,
            "setValues": { "closed": true, "visible": false },
        });

        let response = self
            .execute(OperationKind::Mutation, OP_CANCEL_NOTIFICATIONS, variables)
            .await?;

        let affected = response
            .pointer("/update_notification/affected_rows")
            .and_then(Value::as_u64)
            .ok_or_else(|| ClientError::Protocol {
                operation: OP_CANCEL_NOTIFICATIONS.to_string(),
                detail: "missing update_notification.affected_rows".to_string(),
            })?;

        debug!(affected, "cancelled notifications");
        Ok(affected)
    }

    fn empty_result(&self) -> DispatchResult {
        match self.config.dispatch_mode {
            DispatchMode::FlatIds => DispatchResult::Created(Vec::new()),
            DispatchMode::Report => DispatchResult::Report(DispatchReport::default()),
        }
    }

    async fn execute(
        &self,
        kind: OperationKind,
        operation: &str,
        variables: Value,
    ) -> Result<Value> {
        self.executor
            .execute(kind, operation, variables)
            .await
            .map_err(|source| ClientError::Transport {
                operation: operation.to_string(),
                source,
            })
    }
}

fn created_ids(response: &Value) -> Result<Vec<String>> {
    let returning = response
        .pointer("/insert_notification/returning")
        .and_then(Value::as_array)
        .ok_or_else(|| ClientError::Protocol {
            operation: OP_CREATE_NOTIFICATIONS.to_string(),
            detail: "missing insert_notification.returning".to_string(),
        })?;

    returning
        .iter()
        .map(|row| {
            row.get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ClientError::Protocol {
                    operation: OP_CREATE_NOTIFICATIONS.to_string(),
                    detail: "returning row without id".to_string(),
                })
        })
        .collect()
}
