//! Field-level validation results.
//!
//! Step schemas are declared with `validator` derives; their nested
//! `ValidationErrors` are flattened here into a flat map keyed by dotted field
//! path (`title.romaji`, `genres[2]`) so the presentation layer can bind each
//! message to an input without knowing the schema shape.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Field path -> message, ordered by path so equal inputs compare equal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message per field wins.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut flat = FieldErrors::new();
        flatten_into(&mut flat, None, errors);
        flat
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn flatten_into(out: &mut FieldErrors, prefix: Option<&str>, errors: &ValidationErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(first) = field_errors.first() {
                    out.insert(path, describe(first));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_into(out, Some(&path), nested),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    flatten_into(out, Some(&item_path), nested);
                }
            }
        }
    }
}

/// Human-readable message for a validator error, preferring the schema's own
/// message when one was declared.
fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());
    match error.code.as_ref() {
        "required" => "This field is required".to_string(),
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Must be between {} and {} characters", min, max),
            (Some(min), None) => format!("Must be at least {} characters", min),
            (None, Some(max)) => format!("Must be at most {} characters", max),
            (None, None) => "Invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Must be between {} and {}", min, max),
            (Some(min), None) => format!("Must be at least {}", min),
            (None, Some(max)) => format!("Must be at most {}", max),
            (None, None) => "Out of range".to_string(),
        },
        "url" => "Must be a valid URL".to_string(),
        code => format!("Invalid value ({})", code),
    }
}

/// Outcome of validating one wizard step against the current draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    pub valid: bool,
    pub errors: FieldErrors,
}

impl StepValidation {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: FieldErrors::new(),
        }
    }

    /// An invalid result. An empty error map still yields `valid = false`.
    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            valid: false,
            errors,
        }
    }

    pub fn from_schema(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(errors) => Self::invalid(FieldErrors::from(&errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(length(min = 1, message = "Romaji title is required"))]
        romaji: String,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(nested)]
        title: Inner,
        #[validate(range(min = 1, max = 10))]
        count: u32,
    }

    #[test]
    fn nested_errors_flatten_to_dotted_paths() {
        let outer = Outer {
            title: Inner {
                romaji: String::new(),
            },
            count: 0,
        };

        let validation = StepValidation::from_schema(outer.validate());

        assert!(!validation.valid);
        assert_eq!(
            validation.errors.get("title.romaji"),
            Some("Romaji title is required")
        );
        assert!(validation
            .errors
            .get("count")
            .is_some_and(|m| m.starts_with("Must be between")));
        assert_eq!(validation.errors.len(), 2);
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "first");
        errors.insert("title", "second");
        assert_eq!(errors.get("title"), Some("first"));
    }

    #[test]
    fn valid_schema_yields_empty_errors() {
        let outer = Outer {
            title: Inner {
                romaji: "Shingeki no Kyojin".to_string(),
            },
            count: 3,
        };
        assert_eq!(StepValidation::from_schema(outer.validate()), StepValidation::valid());
    }
}
