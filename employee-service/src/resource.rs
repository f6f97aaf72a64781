//! Employee operations over a persistence context
//!
//! [`EmployeeResource`] borrows the request's [`PersistenceContext`] and owns
//! the entity rules: identifiers come from the path (or their absence), never
//! from the body, and payloads are validated before any write. It neither
//! opens nor commits the context.

use crate::handlers::{ApiError, ApiOperation};
use crate::model::{Employee, EmployeeId};
use crate::repository::{PersistenceContext, SearchCriteria};
use crate::validation;

/// Request-scoped employee operations
pub struct EmployeeResource<'a, C> {
    context: &'a mut C,
}

impl<'a, C: PersistenceContext> EmployeeResource<'a, C> {
    pub fn new(context: &'a mut C) -> Self {
        Self { context }
    }

    /// Look up one employee; `Ok(None)` when absent
    pub async fn retrieve(&mut self, id: EmployeeId) -> Result<Option<Employee>, ApiError> {
        self.context
            .find(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Retrieve))
    }

    /// Insert a new employee, ignoring any identifier in the payload
    pub async fn create(&mut self, employee: Employee) -> Result<Employee, ApiError> {
        self.update(None, employee).await
    }

    /// Validate and save `employee` under `id`
    ///
    /// With no `id` the record is inserted and gets a fresh identifier;
    /// otherwise the record with that identifier is replaced, or inserted if
    /// none exists.
    pub async fn update(
        &mut self,
        id: Option<EmployeeId>,
        mut employee: Employee,
    ) -> Result<Employee, ApiError> {
        let operation = match id {
            Some(_) => ApiOperation::Update,
            None => ApiOperation::Create,
        };
        employee.id = id;

        let violations = validation::validate(&employee);
        if !violations.is_empty() {
            return Err(ApiError::constraint_violations(operation, violations));
        }

        let saved = match id {
            Some(_) => self.context.merge(employee).await,
            None => self.context.persist(employee).await,
        }
        .map_err(|e| ApiError::from(e).with_operation(operation))?;

        tracing::debug!(id = ?saved.id, %operation, "Employee saved");
        Ok(saved)
    }

    /// Delete by identifier; a missing record is not an error
    pub async fn delete(&mut self, id: EmployeeId) -> Result<u64, ApiError> {
        let removed = self
            .context
            .delete_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Delete))?;

        tracing::debug!(id, removed, "Employee delete executed");
        Ok(removed)
    }

    /// Employees whose names contain the example's non-empty names
    pub async fn search(&mut self, example: Option<&Employee>) -> Result<Vec<Employee>, ApiError> {
        let criteria = SearchCriteria::from_example(example);
        self.context
            .select(&criteria)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Search))
    }

    /// Every employee
    pub async fn list_all(&mut self) -> Result<Vec<Employee>, ApiError> {
        self.search(None)
            .await
            .map_err(|e| e.with_operation(ApiOperation::List))
    }
}
