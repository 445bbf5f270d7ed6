//! Produit catalog operations.

use tracing::instrument;

use entrepot_core::ProduitId;

use super::{ApiError, Produit, ProduitInput, StocksClient};

impl StocksClient {
    /// List the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_produits(&self, token: &str) -> Result<Vec<Produit>, ApiError> {
        self.get(token, "/api/produits").await
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the product is not found or the API request fails.
    #[instrument(skip(self, token), fields(produit_id = %id))]
    pub async fn get_produit(&self, token: &str, id: ProduitId) -> Result<Produit, ApiError> {
        self.get(token, &format!("/api/produits/{id}")).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns error if the input is rejected (duplicate nom/reference) or
    /// the API request fails.
    #[instrument(skip(self, token, input), fields(nom = %input.nom))]
    pub async fn create_produit(
        &self,
        token: &str,
        input: &ProduitInput,
    ) -> Result<Produit, ApiError> {
        self.post(token, "/api/produits", input).await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns error if the product is not found or the API request fails.
    #[instrument(skip(self, token, input), fields(produit_id = %id))]
    pub async fn update_produit(
        &self,
        token: &str,
        id: ProduitId,
        input: &ProduitInput,
    ) -> Result<Produit, ApiError> {
        self.put(token, &format!("/api/produits/{id}"), input).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the product is not found or the API request fails.
    #[instrument(skip(self, token), fields(produit_id = %id))]
    pub async fn delete_produit(&self, token: &str, id: ProduitId) -> Result<(), ApiError> {
        self.delete::<()>(token, &format!("/api/produits/{id}"), None)
            .await
    }
}
