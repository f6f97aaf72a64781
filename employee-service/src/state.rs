//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::repository::EmployeeStore;

/// Application state shared across handlers
///
/// Generic over the store so the same router runs on PostgreSQL in
/// production and in memory in tests.
#[derive(Clone)]
pub struct AppState<S> {
    config: Arc<Config>,
    store: S,
}

impl<S: EmployeeStore> AppState<S> {
    /// Create a new AppState with the given configuration and store
    pub fn new(config: Config, store: S) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the employee store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryEmployeeStore;

    #[test]
    fn test_state_exposes_config_and_store() {
        let mut config = Config::default();
        config.service.name = "staff-directory".to_string();

        let state = AppState::new(config, InMemoryEmployeeStore::new());
        assert_eq!(state.config().service.name, "staff-directory");
        assert_eq!(state.store().backend(), "memory");

        let cloned = state.clone();
        assert_eq!(cloned.config().service.port, state.config().service.port);
    }
}
