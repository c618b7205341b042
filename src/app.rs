use std::error::Error;

use actix_web::web;
use tracing::info;

use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::start_server;

pub async fn run() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    let config = match ConfigService::new().load() {
        Ok(config) => config,
        Err(err) => {
            bootstrap::init_tracing("info");
            tracing::error!(error = %err, "Invalid configuration");
            return Err(err.into());
        }
    };
    bootstrap::init_tracing(&config.log_filter);

    let state = web::Data::new(bootstrap::setup(&config)?);
    let server = start_server(state, &config)?;

    info!(host = %config.host, port = config.port, "Exercise API listening");
    server.await?;

    Ok(())
}
