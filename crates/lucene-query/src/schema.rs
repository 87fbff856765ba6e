//! Field schema supplied by the host.

use serde::{Deserialize, Serialize};

/// A known queryable field and the literal values it accepts.
///
/// Value order is significant: completions list values in this order and documentation
/// previews show the first few.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name as written before a separator.
    pub key: String,
    /// Allowed values, in display order.
    #[serde(default)]
    pub values: Vec<String>,
}

impl FieldSchema {
    /// Creates a schema entry from a key and its values.
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Formats up to `limit` values as `" (values: a, b, c...)"`.
    ///
    /// Returns an empty string when the field has no values. The ellipsis is only added
    /// when values were left out.
    pub fn value_preview(&self, limit: usize) -> String {
        if self.values.is_empty() {
            return String::new();
        }
        let shown = &self.values[..self.values.len().min(limit)];
        let more = if self.values.len() > limit { "..." } else { "" };
        format!(" (values: {}{more})", shown.join(", "))
    }
}

/// Finds the first schema entry whose key equals `key`.
pub fn find_field<'a>(schema: &'a [FieldSchema], key: &str) -> Option<&'a FieldSchema> {
    schema.iter().find(|field| field.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates() {
        let field = FieldSchema::new("status", ["a", "b", "c", "d"]);
        assert_eq!(field.value_preview(3), " (values: a, b, c...)");
    }

    #[test]
    fn preview_exact_limit_has_no_ellipsis() {
        let field = FieldSchema::new("status", ["a", "b", "c"]);
        assert_eq!(field.value_preview(3), " (values: a, b, c)");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(FieldSchema::new("k", Vec::<String>::new()).value_preview(3), "");
    }

    #[test]
    fn find_is_case_sensitive() {
        let schema = vec![FieldSchema::new("status", ["a"])];
        assert!(find_field(&schema, "status").is_some());
        assert!(find_field(&schema, "Status").is_none());
    }

    #[test]
    fn deserializes_without_values() {
        let field: FieldSchema = serde_json::from_str(r#"{"key": "tags"}"#).unwrap();
        assert_eq!(field.key, "tags");
        assert!(field.values.is_empty());
    }
}
