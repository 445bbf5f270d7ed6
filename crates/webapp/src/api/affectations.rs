//! Affectation (product-to-stock assignment) operations.
//!
//! The affectation endpoints take their arguments as query parameters with
//! an empty body; that is the backend's contract, kept as-is.

use serde::Serialize;
use tracing::instrument;

use entrepot_core::{ProduitId, StockId};

use super::{Affectation, ApiError, StockFaibleRow, StocksClient};

#[derive(Serialize)]
struct AffecterParams {
    #[serde(rename = "produitId")]
    produit_id: ProduitId,
    #[serde(rename = "stockId")]
    stock_id: StockId,
    quantite: i64,
}

#[derive(Serialize)]
struct ModifierQuantiteParams {
    #[serde(rename = "produitId")]
    produit_id: ProduitId,
    #[serde(rename = "stockId")]
    stock_id: StockId,
    /// The endpoint takes the replacement quantity, not a delta.
    #[serde(rename = "nouvelleQuantite")]
    nouvelle_quantite: i64,
}

#[derive(Serialize)]
struct AnnulerParams {
    #[serde(rename = "produitId")]
    produit_id: ProduitId,
    #[serde(rename = "stockId")]
    stock_id: StockId,
}

#[derive(Serialize)]
struct SeuilParams {
    seuil: i64,
}

impl StocksClient {
    /// List the product quantities assigned to one stock.
    ///
    /// # Errors
    ///
    /// Returns error if the stock is not found or the API request fails.
    #[instrument(skip(self, token), fields(stock_id = %stock_id))]
    pub async fn get_affectations(
        &self,
        token: &str,
        stock_id: StockId,
    ) -> Result<Vec<Affectation>, ApiError> {
        self.get(token, &format!("/api/produit-stock/stock/{stock_id}/produits"))
            .await
    }

    /// Assign a quantity of a product to a stock.
    ///
    /// # Errors
    ///
    /// Returns error if either entity is missing, the quantity is rejected,
    /// or the API request fails.
    #[instrument(skip(self, token), fields(produit_id = %produit_id, stock_id = %stock_id, quantite))]
    pub async fn affecter_produit(
        &self,
        token: &str,
        produit_id: ProduitId,
        stock_id: StockId,
        quantite: i64,
    ) -> Result<Affectation, ApiError> {
        self.post_query(
            token,
            "/api/produit-stock/affecter",
            &AffecterParams {
                produit_id,
                stock_id,
                quantite,
            },
        )
        .await
    }

    /// Replace the assigned quantity of a product in a stock.
    ///
    /// # Errors
    ///
    /// Returns error if the affectation does not exist or the API request
    /// fails.
    #[instrument(skip(self, token), fields(produit_id = %produit_id, stock_id = %stock_id, quantite))]
    pub async fn modifier_quantite(
        &self,
        token: &str,
        produit_id: ProduitId,
        stock_id: StockId,
        quantite: i64,
    ) -> Result<Affectation, ApiError> {
        self.put_query(
            token,
            "/api/produit-stock/modifier-quantite",
            &ModifierQuantiteParams {
                produit_id,
                stock_id,
                nouvelle_quantite: quantite,
            },
        )
        .await
    }

    /// Remove a product's assignment from a stock.
    ///
    /// # Errors
    ///
    /// Returns error if the affectation does not exist or the API request
    /// fails.
    #[instrument(skip(self, token), fields(produit_id = %produit_id, stock_id = %stock_id))]
    pub async fn annuler_affectation(
        &self,
        token: &str,
        produit_id: ProduitId,
        stock_id: StockId,
    ) -> Result<(), ApiError> {
        self.delete(
            token,
            "/api/produit-stock/annuler-affectation",
            Some(&AnnulerParams {
                produit_id,
                stock_id,
            }),
        )
        .await
    }

    /// List product-in-stock rows whose quantity is below the threshold.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_stock_faible(
        &self,
        token: &str,
        seuil: i64,
    ) -> Result<Vec<StockFaibleRow>, ApiError> {
        self.get_with_query(token, "/api/produit-stock/stock-faible", &SeuilParams { seuil })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // The backend binds these as required request parameters; a wrong name
    // is a 400 on every call, so the serialized keys are part of the
    // contract.
    #[test]
    fn test_modifier_quantite_param_names() {
        let params = ModifierQuantiteParams {
            produit_id: ProduitId::new(1),
            stock_id: StockId::new(2),
            nouvelle_quantite: 7,
        };
        let v = serde_json::to_value(&params).unwrap();
        assert_eq!(v["produitId"], 1);
        assert_eq!(v["stockId"], 2);
        assert_eq!(v["nouvelleQuantite"], 7);
        assert!(v.get("modification").is_none());
    }

    #[test]
    fn test_affecter_param_names() {
        let params = AffecterParams {
            produit_id: ProduitId::new(3),
            stock_id: StockId::new(4),
            quantite: 5,
        };
        let v = serde_json::to_value(&params).unwrap();
        assert_eq!(v["produitId"], 3);
        assert_eq!(v["quantite"], 5);
    }
}
