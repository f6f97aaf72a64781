//! employee-service binary
//!
//! Runs on PostgreSQL when a `[database]` section is configured, otherwise on
//! the in-memory store.

use employee_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    match config.database.clone() {
        Some(db_config) => {
            let pool = create_pool(&db_config).await?;
            let store = PgEmployeeStore::new(pool);
            if db_config.initialize_schema {
                store.initialize().await?;
            }
            run(config, store).await
        }
        None => {
            tracing::warn!("No database configured; employees are kept in memory only");
            run(config, InMemoryEmployeeStore::new()).await
        }
    }
}

async fn run<S: EmployeeStore>(config: Config, store: S) -> Result<()> {
    tracing::info!(backend = store.backend(), "Employee store ready");

    let state = AppState::new(config.clone(), store);
    Server::new(config).serve(router(state)).await
}
