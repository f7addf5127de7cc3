//! Strict `{{.Field}}` placeholder substitution.
//!
//! Stored heading and content strings are micro-templates with dot-path
//! placeholders bound against a caller-supplied variable bag. Substitution is
//! strict: malformed placeholders and unresolved paths fail the render rather
//! than degrading to empty text.

use std::collections::HashMap;

use serde_json::Value;

use super::types::{NotificationTemplate, TemplateError};

static NULL: Value = Value::Null;

/// Render every heading and content locale of `template` against `variables`
/// and return a new template carrying only the id and the rendered maps.
///
/// The input template is not mutated, and metadata is not carried through a
/// render. Any single locale failure aborts the whole render; no partial maps
/// are returned.
pub fn render(
    template: &NotificationTemplate,
    variables: Option<&Value>,
) -> Result<NotificationTemplate, TemplateError> {
    let mut headings = HashMap::with_capacity(template.headings.len());
    for (locale, text) in &template.headings {
        let scope = format!("{}:heading:{}", template.id, locale);
        headings.insert(locale.clone(), render_str(text, variables, &scope)?);
    }

    let mut contents = HashMap::with_capacity(template.contents.len());
    for (locale, text) in &template.contents {
        let scope = format!("{}:content:{}", template.id, locale);
        contents.insert(locale.clone(), render_str(text, variables, &scope)?);
    }

    Ok(NotificationTemplate {
        id: template.id.clone(),
        headings,
        contents,
        metadata: Default::default(),
    })
}

/// Substitute the placeholders of one template string. `scope` names the
/// template field being rendered and only appears in errors.
pub(crate) fn render_str(
    text: &str,
    variables: Option<&Value>,
    scope: &str,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| TemplateError::Syntax {
            scope: scope.to_string(),
            detail: "unterminated placeholder".to_string(),
        })?;

        out.push_str(&resolve(after[..end].trim(), variables, scope)?);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

fn resolve(token: &str, variables: Option<&Value>, scope: &str) -> Result<String, TemplateError> {
    // Only dot-path field access is supported; anything else is a syntax
    // error, not a silent pass-through.
    let Some(path) = token.strip_prefix('.') else {
        return Err(TemplateError::Syntax {
            scope: scope.to_string(),
            detail: format!("unsupported action {{{{{token}}}}}"),
        });
    };

    let mut current = variables.unwrap_or(&NULL);
    if !path.is_empty() {
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(TemplateError::Syntax {
                    scope: scope.to_string(),
                    detail: format!("empty segment in {{{{.{path}}}}}"),
                });
            }
            current = current
                .as_object()
                .and_then(|object| object.get(segment))
                .ok_or_else(|| TemplateError::MissingVariable {
                    scope: scope.to_string(),
                    path: format!(".{path}"),
                })?;
        }
    }

    Ok(match current {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template(id: &str, headings: &[(&str, &str)], contents: &[(&str, &str)]) -> NotificationTemplate {
        NotificationTemplate {
            id: id.to_string(),
            headings: headings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            contents: contents
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            metadata: Default::default(),
        }
    }

    #[test]
    fn test_render_simple() {
        let vars = json!({ "Name": "Ann" });
        let rendered = render(
            &template("welcome", &[("en", "Hi {{.Name}}")], &[]),
            Some(&vars),
        )
        .unwrap();

        assert_eq!(rendered.headings["en"], "Hi Ann");
    }

    #[test]
    fn test_render_nested_path() {
        let vars = json!({ "Order": { "Id": "ORD-7" } });
        assert_eq!(
            render_str("Order {{.Order.Id}} shipped", Some(&vars), "t").unwrap(),
            "Order ORD-7 shipped"
        );
    }

    #[test]
    fn test_render_number_variable() {
        let vars = json!({ "Count": 42 });
        assert_eq!(
            render_str("You have {{.Count}} items", Some(&vars), "t").unwrap(),
            "You have 42 items"
        );
    }

    #[test]
    fn test_missing_variable_fails() {
        let vars = json!({ "Name": "Ann" });
        let err = render_str("Hi {{.Missing}}", Some(&vars), "t").unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable { ref path, .. } if path == ".Missing"));
    }

    #[test]
    fn test_missing_bag_fails() {
        let err = render_str("Hi {{.Name}}", None, "t").unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable { .. }));
    }

    #[test]
    fn test_unterminated_placeholder_fails() {
        let err = render_str("Hi {{.Name", None, "t").unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { .. }));
    }

    #[test]
    fn test_non_dot_action_fails() {
        let err = render_str("{{range .Items}}", None, "t").unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { .. }));
    }

    #[test]
    fn test_placeholder_free_render_is_identity() {
        let input = template("plain", &[("en", "No placeholders here")], &[("en", "Body")]);
        let rendered = render(&input, None).unwrap();

        assert_eq!(rendered.headings, input.headings);
        assert_eq!(rendered.contents, input.contents);
    }

    #[test]
    fn test_render_does_not_carry_metadata() {
        let mut input = template("meta", &[], &[]);
        input.metadata.color = "#00ff00".to_string();

        let rendered = render(&input, None).unwrap();
        assert_eq!(rendered.metadata, Default::default());
    }

    #[test]
    fn test_heading_and_content_locales_independent() {
        let vars = json!({ "Name": "Ann" });
        let rendered = render(
            &template("mixed", &[("en", "Hi {{.Name}}")], &[("vi", "Chào {{.Name}}")]),
            Some(&vars),
        )
        .unwrap();

        assert_eq!(rendered.headings.len(), 1);
        assert_eq!(rendered.contents.len(), 1);
        assert_eq!(rendered.contents["vi"], "Chào Ann");
    }
}
