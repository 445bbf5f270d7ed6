//! Data fetch orchestration for the report.
//!
//! One load cycle fetches the product catalog and the stock list together,
//! then every stock's affectation list with one request per stock, all in
//! flight at once. A failed sub-fetch never aborts the cycle: catalog or
//! stock-list failures leave an empty collection and an error message;
//! per-stock failures exclude only that stock from the tree. Error
//! messages accumulate (joined with "; "), never replace each other.
//!
//! There is no retry policy; recovery is the user reloading the page,
//! which runs a fresh cycle.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::instrument;

use entrepot_core::StockId;

use crate::api::{Affectation, Produit, Stock, StocksClient};

/// The settled result of one load cycle.
#[derive(Debug, Default)]
pub struct ReportSource {
    /// Full product catalog (empty if that fetch failed).
    pub produits: Vec<Produit>,
    /// Full stock list (empty if that fetch failed).
    pub stocks: Vec<Stock>,
    /// Affectations per stock, for stocks whose content fetch succeeded.
    pub contents: HashMap<StockId, Vec<Affectation>>,
    /// Stocks whose content fetch failed; excluded from the tree.
    pub failed_stocks: HashSet<StockId>,
    /// Accumulated user-facing error messages, in arrival order.
    pub errors: Vec<String>,
}

impl ReportSource {
    /// The concatenated error banner, if any error occurred.
    #[must_use]
    pub fn error_banner(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join("; "))
        }
    }

}

/// Run one complete load cycle.
///
/// Always returns a `ReportSource`; failures are recorded inside it.
#[instrument(skip(client, token))]
pub async fn load_all(client: &StocksClient, token: &str) -> ReportSource {
    let mut source = ReportSource::default();

    // Catalog and stock list are independent; fetch them together.
    let (produits_result, stocks_result) =
        tokio::join!(client.get_produits(token), client.get_stocks(token));

    match produits_result {
        Ok(produits) => source.produits = produits,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch product catalog");
            source
                .errors
                .push("Impossible de charger les noms des produits.".to_string());
        }
    }

    match stocks_result {
        Ok(stocks) => source.stocks = stocks,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch stock list");
            source
                .errors
                .push("Impossible de charger la liste des stocks.".to_string());
        }
    }

    // One content request per stock, all in flight together. Completion
    // order does not matter; results are keyed by stock id.
    let content_futures = source.stocks.iter().map(|stock| {
        let client = client.clone();
        let id = stock.id;
        let nom = stock.nom.clone();
        async move { (id, nom, client.get_affectations(token, id).await) }
    });

    for (id, nom, result) in join_all(content_futures).await {
        match result {
            Ok(affectations) => {
                source.contents.insert(id, affectations);
            }
            Err(e) => {
                tracing::error!(stock_id = %id, error = %e, "Failed to fetch stock contents");
                source.failed_stocks.insert(id);
                source.errors.push(format!("Erreur chargement stock {nom}"));
            }
        }
    }

    source
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_banner_empty() {
        let source = ReportSource::default();
        assert!(source.error_banner().is_none());
    }

    #[test]
    fn test_error_banner_accumulates() {
        let source = ReportSource {
            errors: vec![
                "Impossible de charger la liste des stocks.".to_string(),
                "Erreur chargement stock Casa".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            source.error_banner().unwrap(),
            "Impossible de charger la liste des stocks.; Erreur chargement stock Casa"
        );
    }

    #[test]
    fn test_failed_stock_not_in_contents() {
        let mut source = ReportSource::default();
        source.contents.insert(StockId::new(1), Vec::new());
        source.failed_stocks.insert(StockId::new(2));

        assert!(source.contents.contains_key(&StockId::new(1)));
        assert!(!source.contents.contains_key(&StockId::new(2)));
    }
}
