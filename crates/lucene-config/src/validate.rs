//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for fields that completion can
//! never offer correctly.

use std::{collections::HashSet, fmt};

use lucene_query::FieldSchema;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A field has an empty key.
    EmptyKey,
    /// A field key contains characters other than ASCII letters, digits and `_`, so it is
    /// never recognized before a separator.
    KeyNotIdentifier {
        /// The offending key.
        key: String,
    },
    /// A field lists no values.
    NoValues {
        /// Field key.
        key: String,
    },
    /// A field lists the same value more than once.
    DuplicateValue {
        /// Field key.
        key: String,
        /// The repeated value.
        value: String,
    },
    /// No fields are defined.
    NoFieldsDefined,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "a field has an empty key"),
            Self::KeyNotIdentifier { key } => {
                write!(
                    f,
                    "field '{key}' contains characters that cannot precede a separator"
                )
            }
            Self::NoValues { key } => write!(f, "field '{key}' has no values"),
            Self::DuplicateValue { key, value } => {
                write!(f, "field '{key}' lists value '{value}' more than once")
            }
            Self::NoFieldsDefined => write!(f, "no fields are defined in configuration"),
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - Empty keys and keys that are not identifier-shaped
/// - Fields with no values, or with repeated values
/// - Empty configuration (no fields defined)
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    if config.fields.is_empty() {
        return vec![ConfigWarning::NoFieldsDefined];
    }

    config.fields.iter().flat_map(validate_field).collect()
}

/// Validates a single field.
fn validate_field(field: &FieldSchema) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let key = &field.key;

    if key.is_empty() {
        warnings.push(ConfigWarning::EmptyKey);
    } else if !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        warnings.push(ConfigWarning::KeyNotIdentifier { key: key.clone() });
    }

    if field.values.is_empty() {
        warnings.push(ConfigWarning::NoValues { key: key.clone() });
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for value in &field.values {
        if !seen.insert(value.as_str()) && reported.insert(value.as_str()) {
            warnings.push(ConfigWarning::DuplicateValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a config holding the given fields.
    fn config_with(fields: Vec<FieldSchema>) -> Config {
        Config {
            fields,
            ..Config::default()
        }
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(
            validate_config(&Config::default()),
            vec![ConfigWarning::NoFieldsDefined]
        );
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(vec![FieldSchema::new("status", ["active", "inactive"])]);
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_empty_key() {
        let config = config_with(vec![FieldSchema::new("", ["a"])]);
        assert_eq!(validate_config(&config), vec![ConfigWarning::EmptyKey]);
    }

    #[test]
    fn test_key_not_identifier() {
        let config = config_with(vec![FieldSchema::new("first-name", ["a"])]);
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::KeyNotIdentifier {
                key: "first-name".into()
            }]
        );
    }

    #[test]
    fn test_no_values() {
        let config = config_with(vec![FieldSchema::new("tags", Vec::<String>::new())]);
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::NoValues { key: "tags".into() }]
        );
    }

    #[test]
    fn test_duplicate_reported_once() {
        let config = config_with(vec![FieldSchema::new("s", ["a", "b", "a", "a"])]);
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::DuplicateValue {
                key: "s".into(),
                value: "a".into()
            }]
        );
    }

    #[test]
    fn test_display() {
        let warning = ConfigWarning::NoValues { key: "tags".into() };
        assert_eq!(warning.to_string(), "field 'tags' has no values");
    }
}
