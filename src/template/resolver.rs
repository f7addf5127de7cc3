//! Batched template lookup and upsert through the execution collaborator.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::executor::{Executor, OperationKind};
use crate::filter::Filter;

use super::types::{NotificationTemplate, RawTemplate};

pub(crate) const OP_GET_TEMPLATES: &str = "GetNotificationTemplatesByIds";
pub(crate) const OP_UPSERT_TEMPLATES: &str = "UpsertNotificationTemplates";

/// Fetches and upserts stored templates in single batched operations.
///
/// No template cache is held between calls; every composition re-fetches the
/// ids it needs, so concurrent renders never observe stale content.
#[derive(Clone)]
pub struct TemplateResolver {
    executor: Arc<dyn Executor>,
}

impl TemplateResolver {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Fetch all templates whose id is in `ids`, keyed by id.
    ///
    /// An empty id set returns an empty map without touching the backend. Ids
    /// absent from the store are simply absent from the map, never fabricated;
    /// a decode failure for any single record fails the whole call.
    pub async fn fetch_by_ids<I, S>(&self, ids: I) -> Result<HashMap<String, NotificationTemplate>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        debug!(count = ids.len(), "fetching notification templates");
        let filter = Filter::new().within("id", ids);
        let response = self
            .execute(
                OperationKind::Query,
                OP_GET_TEMPLATES,
                json!({ "where": filter }),
            )
            .await?;

        let records = parse_records(response, "/notification_template", OP_GET_TEMPLATES)?;
        let mut templates = HashMap::with_capacity(records.len());
        for template in records {
            templates.insert(template.id.clone(), template);
        }
        Ok(templates)
    }

    /// Insert-or-update templates keyed by id, returning the post-upsert
    /// records.
    ///
    /// On conflict only headings and contents are rewritten; metadata is
    /// immutable once created. An empty input returns an empty vec without a
    /// backend call.
    pub async fn upsert(
        &self,
        templates: &[NotificationTemplate],
    ) -> Result<Vec<NotificationTemplate>> {
        if templates.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = templates.len(), "upserting notification templates");
        let response = self
            .execute(
                OperationKind::Mutation,
                OP_UPSERT_TEMPLATES,
                json!({ "objects": templates }),
            )
            .await?;

        parse_records(
            response,
            "/insert_notification_template/returning",
            OP_UPSERT_TEMPLATES,
        )
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

/// Decode the record array at `pointer`, then parse each record. One bad
/// record fails the whole batch; no partial results.
fn parse_records(
    response: Value,
    pointer: &str,
    operation: &str,
) -> Result<Vec<NotificationTemplate>> {
    let raw = response
        .pointer(pointer)
        .cloned()
        .ok_or_else(|| ClientError::Protocol {
            operation: operation.to_string(),
            detail: format!("missing {pointer} in response"),
        })?;

    let records: Vec<RawTemplate> =
        serde_json::from_value(raw).map_err(|err| ClientError::Protocol {
            operation: operation.to_string(),
            detail: err.to_string(),
        })?;

    records
        .into_iter()
        .map(|record| record.parse().map_err(ClientError::from))
        .collect()
}
