//! Delivery-agent mapping operations.
//!
//! Mappings route a livraisons spreadsheet line (agent name) to a stock
//! (prestataire + ville + type). The listing page filters webapp-side;
//! the API exposes no list-level search.

use tracing::instrument;

use entrepot_core::MappingLivreurId;

use super::{ApiError, MappingLivreur, MappingLivreurInput, StocksClient};

impl StocksClient {
    /// List every delivery-agent mapping.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_mappings(&self, token: &str) -> Result<Vec<MappingLivreur>, ApiError> {
        self.get(token, "/api/mapping-livreur").await
    }

    /// Get a single mapping by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the mapping is not found or the API request fails.
    #[instrument(skip(self, token), fields(mapping_id = %id))]
    pub async fn get_mapping(
        &self,
        token: &str,
        id: MappingLivreurId,
    ) -> Result<MappingLivreur, ApiError> {
        self.get(token, &format!("/api/mapping-livreur/{id}")).await
    }

    /// Create a mapping.
    ///
    /// # Errors
    ///
    /// Returns error if the input is rejected or the API request fails.
    #[instrument(skip(self, token, input), fields(nom_livreur = %input.nom_livreur))]
    pub async fn create_mapping(
        &self,
        token: &str,
        input: &MappingLivreurInput,
    ) -> Result<MappingLivreur, ApiError> {
        self.post(token, "/api/mapping-livreur", input).await
    }

    /// Update a mapping.
    ///
    /// # Errors
    ///
    /// Returns error if the mapping is not found or the API request fails.
    #[instrument(skip(self, token, input), fields(mapping_id = %id))]
    pub async fn update_mapping(
        &self,
        token: &str,
        id: MappingLivreurId,
        input: &MappingLivreurInput,
    ) -> Result<MappingLivreur, ApiError> {
        self.put(token, &format!("/api/mapping-livreur/{id}"), input)
            .await
    }

    /// Delete a mapping.
    ///
    /// # Errors
    ///
    /// Returns error if the mapping is not found or the API request fails.
    #[instrument(skip(self, token), fields(mapping_id = %id))]
    pub async fn delete_mapping(&self, token: &str, id: MappingLivreurId) -> Result<(), ApiError> {
        self.delete::<()>(token, &format!("/api/mapping-livreur/{id}"), None)
            .await
    }
}
