//! Dispatch result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one batch submission, shaped by the configured
/// [`DispatchMode`](crate::config::DispatchMode).
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// Ordered created-row ids (legacy flat contract).
    Created(Vec<String>),

    /// Per-item delivery report (structured contract).
    Report(DispatchReport),
}

impl DispatchResult {
    /// Created ids, when the flat contract was in use.
    pub fn created_ids(&self) -> Option<&[String]> {
        match self {
            DispatchResult::Created(ids) => Some(ids),
            DispatchResult::Report(_) => None,
        }
    }

    /// The delivery report, when the structured contract was in use.
    pub fn report(&self) -> Option<&DispatchReport> {
        match self {
            DispatchResult::Created(_) => None,
            DispatchResult::Report(report) => Some(report),
        }
    }

    /// Whether the backend acknowledged zero items.
    pub fn is_empty(&self) -> bool {
        match self {
            DispatchResult::Created(ids) => ids.is_empty(),
            DispatchResult::Report(report) => report.results.is_empty(),
        }
    }
}

/// Per-item delivery report with aggregate counts.
///
/// Items the backend marked failed or rate-limited stay in `results`; they
/// are data, not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    #[serde(default)]
    pub results: Vec<DeliveryOutcome>,

    #[serde(default)]
    pub success_count: u64,

    #[serde(default)]
    pub failure_count: u64,
}

/// Backend verdict for one submitted notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub success: bool,

    #[serde(default)]
    pub rate_limited: bool,

    /// Routing label the item was submitted under.
    #[serde(default)]
    pub client_name: String,

    /// Backend-assigned request id.
    #[serde(default)]
    pub request_id: String,

    /// Backend-assigned message id.
    #[serde(default)]
    pub message_id: String,

    /// Backend error payload for failed items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}
