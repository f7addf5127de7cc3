//! Request and wire types for the notification insert path.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform decorations and correlation fields attached to a notification or
/// template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationMetadata {
    #[serde(default)]
    pub case_id: String,

    #[serde(default)]
    pub session_id: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub subtitles: HashMap<String, serde_json::Value>,
}

/// One message to dispatch.
///
/// Field spellings on the wire match the deployed store schema exactly,
/// including the historical `api_id` spelling of the app id column. Empty or
/// unset fields are omitted from serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    #[serde(rename = "api_id", default, skip_serializing_if = "String::is_empty")]
    pub app_id: String,

    /// Free-form routing label; see [`to_client_name`](super::to_client_name).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_name: String,

    /// Reference to a stored template. When set, the rendered template
    /// headings/contents overwrite the inline maps during composition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub template_id: String,

    #[serde(default)]
    pub broadcast: bool,

    /// Locale code -> heading text.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headings: HashMap<String, String>,

    /// Locale code -> body text.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub contents: HashMap<String, String>,

    /// Subject correlation, used later to scope cancellation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    /// Explicit per-recipient fan-out. Legacy composition lifts these into the
    /// nested `users` sub-object of the insert shape.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,

    /// Dispatch time. Defaulted to the composition wall clock when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_after: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NotificationMetadata>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub visible: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Nested recipient fan-out rows of the legacy insert shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientList {
    pub data: Vec<RecipientRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientRow {
    pub user_id: String,
}

/// Store-ready batch item: the normalized request plus the optional nested
/// recipient list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationInsert {
    #[serde(flatten)]
    pub request: NotificationRequest,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<RecipientList>,
}

impl From<NotificationRequest> for NotificationInsert {
    fn from(request: NotificationRequest) -> Self {
        Self {
            request,
            users: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_fields() {
        let request = NotificationRequest {
            client_name: "billing".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "client_name": "billing", "broadcast": false })
        );
    }

    #[test]
    fn test_app_id_keeps_legacy_spelling() {
        let request = NotificationRequest {
            app_id: "app-1".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["api_id"], "app-1");
        assert!(value.get("app_id").is_none());
    }

    #[test]
    fn test_insert_flattens_request_and_nests_users() {
        let mut request = NotificationRequest::default();
        request.contents.insert("en".to_string(), "hi".to_string());
        request.user_ids = vec!["u1".to_string()];

        let insert = NotificationInsert {
            users: Some(RecipientList {
                data: vec![RecipientRow {
                    user_id: "u1".to_string(),
                }],
            }),
            request,
        };

        let value = serde_json::to_value(&insert).unwrap();
        assert_eq!(value["contents"]["en"], "hi");
        assert_eq!(value["users"]["data"][0]["user_id"], "u1");
    }

    #[test]
    fn test_visible_serialized_only_when_true() {
        let mut request = NotificationRequest::default();
        assert!(serde_json::to_value(&request)
            .unwrap()
            .get("visible")
            .is_none());

        request.visible = true;
        assert_eq!(serde_json::to_value(&request).unwrap()["visible"], true);
    }
}
