//! # employee-service
//!
//! CRUD REST service for Employee records.
//!
//! ## Endpoints
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/employee/{id}` | the employee, or `null` |
//! | GET | `/employee` | every employee |
//! | PUT | `/employee` | insert; `Location` header names the new record |
//! | PUT | `/employee/{id}` | replace or insert under `id` |
//! | DELETE | `/employee/{id}` | delete (succeeds when nothing matched) |
//! | POST | `/employee/search` | case-sensitive substring search on names |
//! | GET | `/health`, `/ready` | liveness and readiness probes |
//!
//! Payloads failing validation are answered with 412 and a JSON object
//! mapping each offending property to its message.
//!
//! ## Example
//!
//! ```rust,no_run
//! use employee_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), InMemoryEmployeeStore::new());
//!
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod model;
pub mod observability;
pub mod repository;
pub mod resource;
pub mod server;
pub mod state;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig};
    pub use crate::database::create_pool;
    pub use crate::error::{DatabaseError, DatabaseErrorKind, DatabaseOperation, Error, Result};
    pub use crate::handlers::{router, ApiError, ApiErrorKind, ApiOperation};
    pub use crate::health::{health, readiness};
    pub use crate::model::{Employee, EmployeeId};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        EmployeeStore, InMemoryEmployeeStore, PersistenceContext, PgEmployeeStore,
        RepositoryError, SearchCriteria,
    };
    pub use crate::resource::EmployeeResource;
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
