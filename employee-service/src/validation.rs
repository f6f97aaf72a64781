//! Constraint validation for request payloads
//!
//! Wraps the `validator` derive so callers see a flat list of
//! [`ConstraintViolation`]s keyed by the JSON property path rather than the
//! Rust field name.

use std::collections::BTreeMap;

use validator::Validate;

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// JSON property path of the offending value (e.g. `firstName`)
    pub property_path: String,
    /// Message declared on the constraint
    pub message: String,
}

/// Validate an entity against its declared constraints
///
/// Returns an empty list when the entity is valid. One violation is reported
/// per property; when several constraints fail on the same property the
/// first one declared wins.
pub fn validate<T: Validate>(entity: &T) -> Vec<ConstraintViolation> {
    let Err(errors) = entity.validate() else {
        return Vec::new();
    };

    let mut violations: Vec<ConstraintViolation> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, field_errors)| {
            let field: &str = field.as_ref();
            field_errors.first().map(|error| ConstraintViolation {
                property_path: property_path(field),
                message: error
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();

    violations.sort_by(|a, b| a.property_path.cmp(&b.property_path));
    violations
}

/// Collapse violations into the property -> message map sent to clients
pub fn violation_map(violations: &[ConstraintViolation]) -> BTreeMap<String, String> {
    violations
        .iter()
        .map(|v| (v.property_path.clone(), v.message.clone()))
        .collect()
}

/// Convert a snake_case field name to its camelCase property path
fn property_path(field: &str) -> String {
    let mut path = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = !path.is_empty();
        } else if upper_next {
            path.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            path.push(ch);
        }
    }
    path
}
