//! Stock location operations.

use tracing::instrument;

use entrepot_core::StockId;

use super::{ApiError, Stock, StockInput, StocksClient};

impl StocksClient {
    /// List all stock locations.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_stocks(&self, token: &str) -> Result<Vec<Stock>, ApiError> {
        self.get(token, "/api/stocks").await
    }

    /// Get a single stock by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the stock is not found or the API request fails.
    #[instrument(skip(self, token), fields(stock_id = %id))]
    pub async fn get_stock(&self, token: &str, id: StockId) -> Result<Stock, ApiError> {
        self.get(token, &format!("/api/stocks/{id}")).await
    }

    /// Create a stock location.
    ///
    /// # Errors
    ///
    /// Returns error if the input is rejected (duplicate nom) or the API
    /// request fails.
    #[instrument(skip(self, token, input), fields(nom = %input.nom))]
    pub async fn create_stock(&self, token: &str, input: &StockInput) -> Result<Stock, ApiError> {
        self.post(token, "/api/stocks", input).await
    }

    /// Update a stock location.
    ///
    /// # Errors
    ///
    /// Returns error if the stock is not found or the API request fails.
    #[instrument(skip(self, token, input), fields(stock_id = %id))]
    pub async fn update_stock(
        &self,
        token: &str,
        id: StockId,
        input: &StockInput,
    ) -> Result<Stock, ApiError> {
        self.put(token, &format!("/api/stocks/{id}"), input).await
    }

    /// Delete a stock location.
    ///
    /// # Errors
    ///
    /// Returns error if the stock is not found or the API request fails.
    #[instrument(skip(self, token), fields(stock_id = %id))]
    pub async fn delete_stock(&self, token: &str, id: StockId) -> Result<(), ApiError> {
        self.delete::<()>(token, &format!("/api/stocks/{id}"), None)
            .await
    }
}
