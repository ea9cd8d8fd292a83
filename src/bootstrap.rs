use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;

use crate::config::Config;
use crate::handlers::Dispatcher;
use crate::services::{DatabaseService, FirebaseService};

/// Long-lived collaborators shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub database: DatabaseService,
    pub dispatcher: Arc<Dispatcher>,
}

/// Installs the env_logger backend for the `log` facade. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Reads `.env` and the process environment, then wires the handler layer.
pub async fn initialize() -> Result<AppServices> {
    dotenv().ok();
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    initialize_with(config).await
}

pub async fn initialize_with(config: Config) -> Result<AppServices> {
    let database = DatabaseService::connect(&config.database)
        .await
        .context("Failed to initialize database")?;
    let firebase = FirebaseService::new(config.firebase.clone())
        .context("Failed to initialize push notification client")?;

    let stats = database.get_statistics().await?;
    log::info!(
        "Handler layer ready: {} registrations, {} notifications, {} polling stations",
        stats.total_registrations,
        stats.total_notifications,
        stats.total_polling_stations
    );

    let dispatcher = Dispatcher::new(Arc::new(database.clone()), Arc::new(firebase));
    Ok(AppServices {
        database,
        dispatcher: Arc::new(dispatcher),
    })
}
