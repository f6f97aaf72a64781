//! Repository error types
//!
//! Errors raised by [`EmployeeStore`](super::EmployeeStore) and
//! [`PersistenceContext`](super::PersistenceContext) implementations carry the
//! store operation that failed and, when known, the entity involved.
//!
//! # Example
//!
//! ```rust
//! use employee_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::connection_failed("Connection refused")
//!     .with_operation(RepositoryOperation::Begin);
//! assert!(matches!(error.kind, RepositoryErrorKind::ConnectionFailed));
//! assert!(error.is_retriable());
//! ```

use std::fmt;

/// Store operation being performed when the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Opening a persistence context
    Begin,
    /// Finding a single entity by ID
    FindById,
    /// Selecting entities matching search criteria
    Search,
    /// Inserting a new entity
    Persist,
    /// Replacing (or inserting) an entity with a known ID
    Merge,
    /// Deleting an entity by ID
    Delete,
    /// Committing a persistence context
    Commit,
    /// Checking store reachability
    Ping,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => write!(f, "begin"),
            Self::FindById => write!(f, "find_by_id"),
            Self::Search => write!(f, "search"),
            Self::Persist => write!(f, "persist"),
            Self::Merge => write!(f, "merge"),
            Self::Delete => write!(f, "delete"),
            Self::Commit => write!(f, "commit"),
            Self::Ping => write!(f, "ping"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Database constraint violation
    ConstraintViolation,
    /// Failed to connect to the store
    ConnectionFailed,
    /// Underlying database error
    DatabaseError,
    /// The store was asked for something it cannot do with the given input
    InvalidInput,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::DatabaseError => write!(f, "database_error"),
            Self::InvalidInput => write!(f, "invalid_input"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Employee")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::Begin,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Create an invalid input error
    pub fn invalid_input(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::InvalidInput, message)
    }

    /// Create a constraint violation error
    pub fn constraint_violation(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConstraintViolation, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        self.kind == RepositoryErrorKind::ConnectionFailed
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let error = RepositoryError::new(
            RepositoryOperation::Persist,
            RepositoryErrorKind::ConstraintViolation,
            "null value in column \"first_name\"",
        );
        assert_eq!(error.operation, RepositoryOperation::Persist);
        assert_eq!(error.kind, RepositoryErrorKind::ConstraintViolation);
        assert!(error.entity_type.is_none());
        assert!(error.entity_id.is_none());
    }

    #[test]
    fn test_with_entity_and_operation() {
        let error = RepositoryError::connection_failed("Connection reset")
            .with_operation(RepositoryOperation::Merge)
            .with_entity("Employee", "42");

        assert_eq!(error.operation, RepositoryOperation::Merge);
        assert_eq!(error.entity_type.as_deref(), Some("Employee"));
        assert_eq!(error.entity_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_is_retriable() {
        assert!(RepositoryError::connection_failed("refused").is_retriable());
        assert!(
            !RepositoryError::constraint_violation(RepositoryOperation::Persist, "taken")
                .is_retriable()
        );
        assert!(!RepositoryError::invalid_input(RepositoryOperation::Merge, "no id").is_retriable());
        assert!(!RepositoryError::new(
            RepositoryOperation::Search,
            RepositoryErrorKind::DatabaseError,
            "syntax error"
        )
        .is_retriable());
    }

    #[test]
    fn test_display_with_entity() {
        let error = RepositoryError::invalid_input(RepositoryOperation::Merge, "missing id")
            .with_entity("Employee", "unassigned");
        assert_eq!(
            error.to_string(),
            "Repository invalid_input error during merge: missing id [Employee: unassigned]"
        );
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::connection_failed("refused");
        assert_eq!(
            error.to_string(),
            "Repository connection_failed error during begin: refused"
        );
    }
}
