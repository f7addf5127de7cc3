//! Backend-agnostic filter predicates.
//!
//! Conditions mirror the flat boolean-expression language of the backing
//! store: a single JSON object mapping field paths to either an operator
//! object (`{"_eq": value}`) or a bare equality value. Predicates are leaves;
//! there is no tree composition because the store's query language is flat.

use chrono::Utc;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{json, Value};

/// A single field condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `{"_eq": value}`
    Eq(Value),
    /// `{"_neq": value}`
    Neq(Value),
    /// `{"_lt": value}`
    Lt(Value),
    /// `{"_gt": value}`
    Gt(Value),
    /// `{"_in": [values]}`
    In(Vec<Value>),
    /// `{"_is_null": false}`
    Exists,
    /// `{"_is_null": true}`
    NotExists,
    /// Bare-value equality shorthand: serialized as the value itself.
    Literal(Value),
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Condition::Eq(value) => operator_object(serializer, "_eq", value),
            Condition::Neq(value) => operator_object(serializer, "_neq", value),
            Condition::Lt(value) => operator_object(serializer, "_lt", value),
            Condition::Gt(value) => operator_object(serializer, "_gt", value),
            Condition::In(values) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("_in", values)?;
                map.end()
            }
            Condition::Exists => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("_is_null", &false)?;
                map.end()
            }
            Condition::NotExists => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("_is_null", &true)?;
                map.end()
            }
            Condition::Literal(value) => value.serialize(serializer),
        }
    }
}

fn operator_object<S>(serializer: S, operator: &str, value: &Value) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(operator, value)?;
    map.end()
}

/// Ordered field -> condition mapping, serialized as one flat JSON object.
///
/// Constructors chain by value:
///
/// ```
/// use ara_notification_client::Filter;
///
/// let filter = Filter::new().eq("client_name", "billing").exists("subject_id");
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, Condition)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition on `field`. Duplicate fields are kept in order; the
    /// backend resolves them.
    pub fn push(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.entries.push((field.into(), condition));
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Condition::Eq(value.into()))
    }

    pub fn neq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Condition::Neq(value.into()))
    }

    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Condition::Lt(value.into()))
    }

    pub fn gt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Condition::Gt(value.into()))
    }

    /// Membership in a value set (`_in`).
    pub fn within<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push(field, Condition::In(values))
    }

    pub fn exists(self, field: impl Into<String>) -> Self {
        self.push(field, Condition::Exists)
    }

    pub fn not_exists(self, field: impl Into<String>) -> Self {
        self.push(field, Condition::NotExists)
    }

    /// Bare-value equality shorthand (`{field: value}`).
    pub fn matching(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Condition::Literal(value.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(String, Condition)] {
        &self.entries
    }

    /// Cancellation scope for a subject reference.
    ///
    /// Always matches `subject_id` by equality; adds a `subject_type` clause
    /// only when the type is non-empty (the clause is omitted entirely, not
    /// matched against the empty string). Always bounds on `send_after > now`:
    /// rows whose dispatch time has already elapsed are never eligible for
    /// cancellation.
    pub fn subject(subject_type: &str, subject_id: &str) -> Self {
        let mut filter = Filter::new().eq("subject_id", subject_id);
        if !subject_type.is_empty() {
            filter = filter.eq("subject_type", subject_type);
        }
        filter.gt("send_after", json!(Utc::now()))
    }
}

impl Serialize for Filter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, condition) in &self.entries {
            map.serialize_entry(field, condition)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_operator_shapes() {
        let filter = Filter::new()
            .eq("a", 1)
            .neq("b", "x")
            .lt("c", 5)
            .gt("d", 6)
            .within("e", ["p", "q"])
            .exists("f")
            .not_exists("g")
            .matching("h", "plain");

        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["a"], json!({ "_eq": 1 }));
        assert_eq!(value["b"], json!({ "_neq": "x" }));
        assert_eq!(value["c"], json!({ "_lt": 5 }));
        assert_eq!(value["d"], json!({ "_gt": 6 }));
        assert_eq!(value["e"], json!({ "_in": ["p", "q"] }));
        assert_eq!(value["f"], json!({ "_is_null": false }));
        assert_eq!(value["g"], json!({ "_is_null": true }));
        assert_eq!(value["h"], json!("plain"));
    }

    #[test]
    fn test_subject_filter_without_type() {
        let filter = Filter::subject("", "sid");
        let value = serde_json::to_value(&filter).unwrap();

        assert_eq!(value["subject_id"], json!({ "_eq": "sid" }));
        assert!(value.get("subject_type").is_none());

        // The future-dispatch bound is always present and parses as a time.
        let bound = value["send_after"]["_gt"].as_str().unwrap();
        assert!(bound.parse::<DateTime<Utc>>().is_ok());
    }

    #[test]
    fn test_subject_filter_with_type() {
        let filter = Filter::subject("order", "sid");
        let value = serde_json::to_value(&filter).unwrap();

        assert_eq!(value["subject_type"], json!({ "_eq": "order" }));
        assert_eq!(value["subject_id"], json!({ "_eq": "sid" }));
        assert!(value.get("send_after").is_some());
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let filter = Filter::new().eq("z", 1).eq("a", 2);
        let text = serde_json::to_string(&filter).unwrap();
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }

    #[test]
    fn test_empty_filter() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(serde_json::to_string(&filter).unwrap(), "{}");
    }
}
