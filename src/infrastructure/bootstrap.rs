use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::PlanLookupUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv::DatasetLoader;
use crate::interfaces::http::HttpState;

/// `RUST_LOG` wins over the configured filter when set.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load the dataset once and wire it into the HTTP state.
///
/// A dataset that fails to load does not stop startup; the service comes up
/// and reports the dataset as unavailable on every lookup.
pub fn setup(config: &AppConfig) -> Result<HttpState> {
    let delimiter = config.delimiter_byte()?;
    let table = DatasetLoader::new(delimiter).load(&config.dataset_path);

    if table.is_empty() {
        error!(
            dataset_path = %config.dataset_path.display(),
            "Exercise dataset is empty; lookups will fail until restart"
        );
    } else {
        info!(rows = table.len(), "Exercise dataset ready");
    }

    Ok(HttpState::new(PlanLookupUseCase::new(Arc::new(table))))
}
