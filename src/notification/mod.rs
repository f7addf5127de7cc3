//! Notification request model and wire helpers.

mod types;

pub use types::{
    NotificationInsert, NotificationMetadata, NotificationRequest, RecipientList, RecipientRow,
};

/// Join a primary client label with additional labels into the `client_name`
/// routing value. With no additional labels the primary label is returned
/// unchanged.
pub fn to_client_name(primary: &str, others: &[&str]) -> String {
    if others.is_empty() {
        return primary.to_string();
    }

    let mut parts = Vec::with_capacity(others.len() + 1);
    parts.push(primary);
    parts.extend_from_slice(others);
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_client_name_single() {
        assert_eq!(to_client_name("a", &[]), "a");
    }

    #[test]
    fn test_to_client_name_joined() {
        assert_eq!(to_client_name("a", &["b", "c"]), "a,b,c");
    }
}
