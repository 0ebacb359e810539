//! CLI command handlers.
//!
//! Each command loads configuration, builds the analytics service over
//! the HTTP adapter, drives one query handle to its settled state, and
//! renders the result.

pub mod metrics;
pub mod product;
pub mod trend;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use crate::cli::output::progress::create_spinner;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::http::AnalyticsHttpClient;
use crate::services::{AnalyticsService, QueryHandle, QueryState, QueryStatus};

/// Load configuration from the standard sources or an explicit file.
pub fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Build the analytics service from loaded configuration.
pub fn build_service(config: &Config) -> Result<AnalyticsService> {
    let client =
        AnalyticsHttpClient::new(&config.api).context("Failed to construct analytics client")?;
    Ok(AnalyticsService::new(Arc::new(client), &config.cache))
}

/// Drive a query handle to its settled state behind a spinner.
pub async fn settle_with_spinner<T: Clone>(
    mut handle: QueryHandle<T>,
    message: &str,
) -> QueryState<T> {
    let spinner = create_spinner(message.to_string());
    let state = handle.settled().await;
    spinner.finish_and_clear();
    state
}

/// Unwrap a settled state into its data, mapping Error onto anyhow.
pub fn settled_data<T>(state: QueryState<T>) -> Result<T> {
    match state.status {
        QueryStatus::Success => state
            .data
            .ok_or_else(|| anyhow!("query succeeded without data")),
        QueryStatus::Error => {
            let message = state
                .error
                .map_or_else(|| "unknown query error".to_string(), |e| e.to_string());
            Err(anyhow!(message))
        }
        QueryStatus::Idle | QueryStatus::Loading => Err(anyhow!("query did not settle")),
    }
}
