//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, StocksClient};
use crate::config::AppConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; gives handlers access to configuration and
/// the stock API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    stocks: StocksClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let stocks = StocksClient::new(&config.api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, stocks }),
        })
    }

    /// Get a reference to the webapp configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the stock API client.
    #[must_use]
    pub fn stocks(&self) -> &StocksClient {
        &self.inner.stocks
    }
}
