//! Store trait definitions
//!
//! Persistence is split in two: an [`EmployeeStore`] is the long-lived,
//! cloneable handle held in application state, and a [`PersistenceContext`]
//! is the request-scoped unit of work it opens. Every read and write of a
//! request goes through one context; [`PersistenceContext::commit`] makes the
//! writes durable and dropping the context without committing discards them.
//!
//! Both traits use RPITIT (Return Position Impl Trait In Traits) so
//! implementations can be written with plain `async fn`.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut ctx = store.begin().await?;
//! let saved = ctx.persist(Employee::new("John", "Smith")).await?;
//! ctx.commit().await?;
//! ```

use std::future::Future;

use super::criteria::SearchCriteria;
use super::error::RepositoryError;
use crate::model::{Employee, EmployeeId};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Long-lived handle to an employee store
pub trait EmployeeStore: Clone + Send + Sync + 'static {
    /// The request-scoped context this store hands out
    type Context: PersistenceContext;

    /// Short backend name used in logs and readiness output
    fn backend(&self) -> &'static str;

    /// Open a new persistence context
    fn begin(&self) -> impl Future<Output = RepositoryResult<Self::Context>> + Send;

    /// Check that the store is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Request-scoped unit of work over the `employee` table
pub trait PersistenceContext: Send {
    /// Find an employee by identifier
    ///
    /// Returns `Ok(None)` when no record has that identifier.
    fn find(
        &mut self,
        id: EmployeeId,
    ) -> impl Future<Output = RepositoryResult<Option<Employee>>> + Send;

    /// Insert a new employee, assigning its identifier
    ///
    /// Any identifier already on `employee` is ignored.
    fn persist(
        &mut self,
        employee: Employee,
    ) -> impl Future<Output = RepositoryResult<Employee>> + Send;

    /// Replace the record with `employee.id`, inserting it if absent
    ///
    /// Fails with [`RepositoryErrorKind::InvalidInput`](super::RepositoryErrorKind::InvalidInput)
    /// when `employee.id` is `None`.
    fn merge(
        &mut self,
        employee: Employee,
    ) -> impl Future<Output = RepositoryResult<Employee>> + Send;

    /// Delete the record with `id`, returning how many rows were removed
    fn delete_by_id(&mut self, id: EmployeeId)
        -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Select every record matching `criteria`
    fn select(
        &mut self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = RepositoryResult<Vec<Employee>>> + Send;

    /// Make this context's writes durable
    fn commit(self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
