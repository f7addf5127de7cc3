//! Batch normalization ahead of dispatch.
//!
//! The composer resolves template references, applies defaults, and emits the
//! store-ready insert batch. It performs no dispatch itself; its only backend
//! traffic is the single batched template lookup.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::keyset::UniqueKeySet;
use crate::notification::{NotificationInsert, NotificationRequest, RecipientList, RecipientRow};
use crate::template::{self, TemplateError, TemplateResolver};

/// Normalization policy, paired with the dispatch contract in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMode {
    /// Silently drop requests that end up with no content and no explicit
    /// recipients, and lift `user_ids` into the nested `users` sub-object.
    Legacy,
    /// Submit every request as-is; the backend judges validity.
    Passthrough,
}

/// Normalizes a batch of notification requests into store-ready inserts.
pub struct Composer<'a> {
    resolver: &'a TemplateResolver,
    mode: ComposeMode,
}

impl<'a> Composer<'a> {
    pub fn new(resolver: &'a TemplateResolver, mode: ComposeMode) -> Self {
        Self { resolver, mode }
    }

    /// Resolve templates, apply defaults, and emit the insert batch.
    ///
    /// All referenced template ids are fetched in one call. A template id
    /// missing from the store aborts the whole composition; no partial batch
    /// is emitted. Rendered template content always overwrites inline
    /// headings/contents on the same request. `send_after` is stamped per item
    /// at the moment it is defaulted.
    pub async fn compose(
        &self,
        requests: Vec<NotificationRequest>,
        variables: Option<&Value>,
    ) -> Result<Vec<NotificationInsert>> {
        let mut template_ids = UniqueKeySet::new();
        template_ids.add(
            requests
                .iter()
                .filter(|request| !request.template_id.is_empty())
                .map(|request| request.template_id.clone()),
        );

        // fetch_by_ids short-circuits an empty id set without a backend call.
        let templates = self.resolver.fetch_by_ids(template_ids.values()).await?;

        let mut batch = Vec::with_capacity(requests.len());
        for mut request in requests {
            if !request.template_id.is_empty() {
                let template = templates
                    .get(&request.template_id)
                    .ok_or_else(|| TemplateError::NotFound(request.template_id.clone()))?;

                let rendered = template::render(template, variables)?;
                request.headings = rendered.headings;
                request.contents = rendered.contents;
            }

            if request.send_after.is_none() {
                request.send_after = Some(Utc::now());
            }

            if let Some(item) = self.finish(request) {
                batch.push(item);
            }
        }

        Ok(batch)
    }

    fn finish(&self, request: NotificationRequest) -> Option<NotificationInsert> {
        match self.mode {
            ComposeMode::Passthrough => Some(request.into()),
            ComposeMode::Legacy => {
                if request.headings.is_empty()
                    && request.contents.is_empty()
                    && request.user_ids.is_empty()
                {
                    debug!(
                        client_name = %request.client_name,
                        "dropping notification request with no content and no recipients"
                    );
                    return None;
                }

                let users = (!request.user_ids.is_empty()).then(|| RecipientList {
                    data: request
                        .user_ids
                        .iter()
                        .cloned()
                        .map(|user_id| RecipientRow { user_id })
                        .collect(),
                });
                Some(NotificationInsert { request, users })
            }
        }
    }
}
