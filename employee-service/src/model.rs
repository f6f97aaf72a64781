//! The Employee entity

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Server-assigned employee identifier
pub type EmployeeId = i64;

/// Entity type name used in error context and logs
pub const ENTITY_TYPE: &str = "Employee";

/// An employee record
///
/// The same shape serves as the request payload, the stored record and the
/// search criteria. Every field is optional on the wire: an absent `id` marks
/// a new record, and absent names are reported by validation rather than
/// rejected during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Option<EmployeeId>,

    #[validate(
        required(message = "may not be null"),
        length(min = 1, max = 50, message = "size must be between 1 and 50")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "may not be null"),
        length(min = 1, max = 50, message = "size must be between 1 and 50")
    )]
    pub last_name: Option<String>,
}

impl Employee {
    /// Create an unsaved employee with the given names
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    /// Set the identifier
    #[must_use]
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }
}
