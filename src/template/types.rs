//! Template types and error definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::NotificationMetadata;

/// Template-specific error type.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("notification template not found: {0}")]
    NotFound(String),

    #[error("bad placeholder syntax in {scope}: {detail}")]
    Syntax { scope: String, detail: String },

    #[error("unresolved variable {path} in {scope}")]
    MissingVariable { scope: String, path: String },

    #[error("failed to decode template {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A named, reusable message body with per-locale headings and contents.
///
/// Templates are shared and never mutated by a render; the heading and content
/// locale sets are independent and need not match. Metadata is written once at
/// creation and never rewritten by an upsert conflict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: String,

    /// Locale code -> heading micro-template.
    #[serde(default)]
    pub headings: HashMap<String, String>,

    /// Locale code -> content micro-template.
    #[serde(default)]
    pub contents: HashMap<String, String>,

    #[serde(default)]
    pub metadata: NotificationMetadata,
}

/// Wire form of a stored template record.
///
/// Headings, contents, and metadata arrive as loosely-typed JSON and are
/// decoded strictly on parse; one malformed field fails the whole record.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTemplate {
    pub id: String,

    #[serde(default)]
    pub headings: serde_json::Value,

    #[serde(default)]
    pub contents: serde_json::Value,

    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl RawTemplate {
    pub(crate) fn parse(self) -> Result<NotificationTemplate, TemplateError> {
        let RawTemplate {
            id,
            headings,
            contents,
            metadata,
        } = self;

        let headings = decode_locale_map(&id, headings)?;
        let contents = decode_locale_map(&id, contents)?;
        let metadata = match metadata {
            serde_json::Value::Null => NotificationMetadata::default(),
            value => serde_json::from_value(value).map_err(|source| TemplateError::Decode {
                id: id.clone(),
                source,
            })?,
        };

        Ok(NotificationTemplate {
            id,
            headings,
            contents,
            metadata,
        })
    }
}

fn decode_locale_map(
    id: &str,
    value: serde_json::Value,
) -> Result<HashMap<String, String>, TemplateError> {
    match value {
        serde_json::Value::Null => Ok(HashMap::new()),
        value => serde_json::from_value(value).map_err(|source| TemplateError::Decode {
            id: id.to_string(),
            source,
        }),
    }
}
