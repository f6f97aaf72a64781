//! HTTP surface of the service
//!
//! - [`routes`]: the `/employee` endpoints
//! - [`router`]: employee endpoints plus `/health` and `/ready`, bound to state
//! - [`ApiError`]: request-time errors with HTTP status mapping
//!
//! # Example
//!
//! ```rust
//! use employee_service::config::Config;
//! use employee_service::handlers::router;
//! use employee_service::repository::InMemoryEmployeeStore;
//! use employee_service::state::AppState;
//!
//! let app = router(AppState::new(Config::default(), InMemoryEmployeeStore::new()));
//! # let _ = app;
//! ```

mod employee;
mod error;
mod extract;
mod response;

use axum::{routing::get, Router};

pub use employee::{employee_location, routes};
pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use extract::{parse_employee_id, EmployeeIdPath, SearchBody};
pub use response::Saved;

use crate::health;
use crate::repository::EmployeeStore;
use crate::state::AppState;

/// Build the application router with all routes bound to `state`
pub fn router<S: EmployeeStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::health::<S>))
        .route("/ready", get(health::readiness::<S>))
        .merge(routes::<S>())
        .with_state(state)
}
