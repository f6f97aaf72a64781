//! In-memory employee store
//!
//! Used when no database is configured and by the HTTP tests. Contexts are
//! serialized: [`InMemoryEmployeeStore::begin`] waits until the previous
//! context is committed or dropped. Each context works on a copy of the table
//! that replaces the shared one on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::criteria::SearchCriteria;
use super::error::RepositoryOperation;
use super::traits::{EmployeeStore, PersistenceContext, RepositoryResult};
use super::RepositoryError;
use crate::model::{Employee, EmployeeId, ENTITY_TYPE};

#[derive(Debug, Clone)]
struct Table {
    rows: BTreeMap<EmployeeId, Employee>,
    /// `None` once an id of `EmployeeId::MAX` has been handed out or merged
    next_id: Option<EmployeeId>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: Some(1),
        }
    }
}

/// Process-local store backed by an ordered map
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeStore {
    table: Arc<Mutex<Table>>,
}

impl InMemoryEmployeeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    type Context = InMemoryPersistenceContext;

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn begin(&self) -> RepositoryResult<Self::Context> {
        let guard = Arc::clone(&self.table).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryPersistenceContext { guard, working })
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

/// Exclusive context over an [`InMemoryEmployeeStore`]
#[derive(Debug)]
pub struct InMemoryPersistenceContext {
    guard: OwnedMutexGuard<Table>,
    working: Table,
}

impl PersistenceContext for InMemoryPersistenceContext {
    async fn find(&mut self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        Ok(self.working.rows.get(&id).cloned())
    }

    async fn persist(&mut self, mut employee: Employee) -> RepositoryResult<Employee> {
        let Some(id) = self.working.next_id else {
            return Err(RepositoryError::constraint_violation(
                RepositoryOperation::Persist,
                "no employee identifiers left",
            )
            .with_entity(ENTITY_TYPE, "unassigned"));
        };
        self.working.next_id = id.checked_add(1);
        employee.id = Some(id);
        self.working.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn merge(&mut self, employee: Employee) -> RepositoryResult<Employee> {
        let Some(id) = employee.id else {
            return Err(RepositoryError::invalid_input(
                RepositoryOperation::Merge,
                "merge requires an identifier",
            )
            .with_entity(ENTITY_TYPE, "unassigned"));
        };
        self.working.next_id = self
            .working
            .next_id
            .zip(id.checked_add(1))
            .map(|(next, after)| next.max(after));
        self.working.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn delete_by_id(&mut self, id: EmployeeId) -> RepositoryResult<u64> {
        Ok(self.working.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn select(&mut self, criteria: &SearchCriteria) -> RepositoryResult<Vec<Employee>> {
        Ok(self
            .working
            .rows
            .values()
            .filter(|e| criteria.matches(e))
            .cloned()
            .collect())
    }

    async fn commit(self) -> RepositoryResult<()> {
        let Self { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}
