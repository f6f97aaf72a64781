//! PostgreSQL employee store
//!
//! Each [`PgPersistenceContext`] wraps one `sqlx` transaction. Dropping the
//! context rolls the transaction back.

use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::criteria::SearchCriteria;
use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{EmployeeStore, PersistenceContext, RepositoryResult};
use crate::error::{DatabaseError, Error};
use crate::model::{Employee, EmployeeId, ENTITY_TYPE};

const SELECT_EMPLOYEE: &str = "SELECT id, first_name, last_name FROM employee";

const MERGE_EMPLOYEE: &str = "INSERT INTO employee (id, first_name, last_name) \
     VALUES ($1, $2, $3) \
     ON CONFLICT (id) DO UPDATE \
     SET first_name = EXCLUDED.first_name, last_name = EXCLUDED.last_name \
     RETURNING id, first_name, last_name";

/// Moves the identity sequence to at least `$1` without ever moving it back
const ADVANCE_IDENTITY: &str = "SELECT setval(\
     pg_get_serial_sequence('employee', 'id'), \
     GREATEST($1, nextval(pg_get_serial_sequence('employee', 'id')) - 1, 1))";

/// PostgreSQL-backed employee store
#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    /// Create a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `employee` table if it does not exist
    ///
    /// Should be called once during application startup.
    pub async fn initialize(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employee (
                id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(DatabaseError::from(e).add_context("create table employee")))?;

        tracing::info!("Employee table ready");
        Ok(())
    }
}

impl EmployeeStore for PgEmployeeStore {
    type Context = PgPersistenceContext;

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn begin(&self) -> RepositoryResult<Self::Context> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(store_error(RepositoryOperation::Begin))?;
        Ok(PgPersistenceContext { tx })
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Ping))?;
        Ok(())
    }
}

/// One request's transaction against [`PgEmployeeStore`]
pub struct PgPersistenceContext {
    tx: Transaction<'static, Postgres>,
}

impl PersistenceContext for PgPersistenceContext {
    async fn find(&mut self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, first_name, last_name FROM employee WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error(RepositoryOperation::FindById))?;

        Ok(row.map(Into::into))
    }

    async fn persist(&mut self, employee: Employee) -> RepositoryResult<Employee> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            INSERT INTO employee (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_error(RepositoryOperation::Persist))?;

        Ok(row.into())
    }

    async fn merge(&mut self, employee: Employee) -> RepositoryResult<Employee> {
        let Some(id) = employee.id else {
            return Err(RepositoryError::invalid_input(
                RepositoryOperation::Merge,
                "merge requires an identifier",
            )
            .with_entity(ENTITY_TYPE, "unassigned"));
        };

        let row = sqlx::query_as::<_, EmployeeRow>(MERGE_EMPLOYEE)
            .bind(id)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                store_error(RepositoryOperation::Merge)(e).with_entity(ENTITY_TYPE, id.to_string())
            })?;

        // Explicit ids bypass the identity sequence; move it past this one.
        sqlx::query(ADVANCE_IDENTITY)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(store_error(RepositoryOperation::Merge))?;

        Ok(row.into())
    }

    async fn delete_by_id(&mut self, id: EmployeeId) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(store_error(RepositoryOperation::Delete))?;

        Ok(result.rows_affected())
    }

    async fn select(&mut self, criteria: &SearchCriteria) -> RepositoryResult<Vec<Employee>> {
        let mut query = search_query(criteria);
        let rows = query
            .build_query_as::<EmployeeRow>()
            .fetch_all(&mut *self.tx)
            .await
            .map_err(store_error(RepositoryOperation::Search))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn commit(self) -> RepositoryResult<()> {
        self.tx
            .commit()
            .await
            .map_err(store_error(RepositoryOperation::Commit))
    }
}

/// Build the search statement for `criteria`
fn search_query(criteria: &SearchCriteria) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_EMPLOYEE);
    for (i, filter) in criteria.filters().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(filter.column.column_name());
        builder.push(" LIKE ");
        builder.push_bind(filter.like_pattern());
        builder.push(r" ESCAPE '\'");
    }
    builder
}

fn store_error(operation: RepositoryOperation) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| DatabaseError::from(e).into_repository_error(operation)
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: Some(row.id),
            first_name: Some(row.first_name),
            last_name: Some(row.last_name),
        }
    }
}
