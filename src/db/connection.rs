use std::time::Duration;

use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::Config;
use crate::utils::error::{AppError, AppResult};

pub async fn init_db(config: &Config) -> AppResult<Database> {
    let mut client_options = ClientOptions::parse(&config.mongo_uri)
        .await
        .map_err(|e| AppError::Config(format!("Failed to parse MongoDB URI: {}", e)))?;

    client_options.app_name = Some("EventPolls".to_string());
    client_options.connect_timeout = Some(config.store_timeout);
    client_options.server_selection_timeout = Some(config.store_timeout);
    client_options.max_idle_time = Some(Duration::from_secs(300));

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::Config(format!("Failed to initialize MongoDB client: {}", e)))?;

    info!(db = %config.db_name, "database client ready");

    Ok(client.database(&config.db_name))
}
