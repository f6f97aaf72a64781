//! Employee persistence
//!
//! - [`EmployeeStore`] / [`PersistenceContext`]: the store abstraction
//! - [`PgEmployeeStore`]: PostgreSQL backend over a `sqlx` pool
//! - [`InMemoryEmployeeStore`]: process-local backend for development and tests
//! - [`SearchCriteria`]: substring filters built from an example record

mod criteria;
mod error;
mod memory;
mod postgres;
mod traits;

pub use criteria::{EmployeeColumn, FilterCondition, SearchCriteria};
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::{InMemoryEmployeeStore, InMemoryPersistenceContext};
pub use postgres::{PgEmployeeStore, PgPersistenceContext};
pub use traits::{EmployeeStore, PersistenceContext, RepositoryResult};
