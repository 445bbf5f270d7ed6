//! Wire types for the stock management API.
//!
//! One documented contract per endpoint, enforced by serde at the boundary.
//! Divergent response shapes are treated as upstream contract bugs, not
//! accommodated with fallback field guessing. The single sanctioned
//! normalization is `Reference`, which accepts the legacy integer shape
//! and stringifies it once (see `entrepot_core::Reference`).

use serde::{Deserialize, Serialize};

use entrepot_core::{MappingLivreurId, ProduitId, Reference, Role, StockId, TypeStock};

/// Default alert threshold applied by the backend when none is set.
pub const DEFAULT_SEUIL_ALERTE: i64 = 30;

// =============================================================================
// Produits
// =============================================================================

/// A catalog item, as returned by `GET /api/produits`.
#[derive(Debug, Clone, Deserialize)]
pub struct Produit {
    pub id: ProduitId,
    #[serde(default = "Reference::empty")]
    pub reference: Reference,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Alert threshold below which a product-in-stock is flagged low.
    #[serde(rename = "seuilAlerte", default = "default_seuil_alerte")]
    pub seuil_alerte: i64,
}

const fn default_seuil_alerte() -> i64 {
    DEFAULT_SEUIL_ALERTE
}

/// Payload for creating or updating a produit.
#[derive(Debug, Clone, Serialize)]
pub struct ProduitInput {
    pub nom: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "seuilAlerte")]
    pub seuil_alerte: i64,
}

// =============================================================================
// Stocks
// =============================================================================

/// A stock location, as returned by `GET /api/stocks`.
#[derive(Debug, Clone, Deserialize)]
pub struct Stock {
    pub id: StockId,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub pays: Option<String>,
    #[serde(default)]
    pub ville: Option<String>,
    #[serde(rename = "typeStock", default)]
    pub type_stock: TypeStock,
    #[serde(default = "default_true")]
    pub actif: bool,
    #[serde(default)]
    pub prestataire: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Payload for creating or updating a stock.
#[derive(Debug, Clone, Serialize)]
pub struct StockInput {
    pub nom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pays: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ville: Option<String>,
    #[serde(rename = "typeStock")]
    pub type_stock: TypeStock,
    pub actif: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prestataire: Option<String>,
}

// =============================================================================
// Affectations (produit <-> stock associations)
// =============================================================================

/// Product summary embedded in an affectation row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProduitRef {
    #[serde(default)]
    pub id: Option<ProduitId>,
    #[serde(default = "Reference::empty")]
    pub reference: Reference,
    #[serde(default)]
    pub nom: String,
    #[serde(rename = "seuilAlerte", default = "default_seuil_alerte")]
    pub seuil_alerte: i64,
}

/// One row of `GET /api/produit-stock/stock/{stockId}/produits`: a quantity
/// of one product assigned to one stock.
#[derive(Debug, Clone, Deserialize)]
pub struct Affectation {
    pub produit: ProduitRef,
    /// Non-negative on a well-behaved backend; invalid/missing coerces to 0.
    #[serde(default)]
    pub quantite: i64,
}

/// One row of `GET /api/produit-stock/stock-faible`: a product whose
/// quantity in some stock is below its alert threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct StockFaibleRow {
    pub produit: ProduitRef,
    pub stock: Stock,
    #[serde(default)]
    pub quantite: i64,
}

// =============================================================================
// Mapping livreur (delivery-agent -> stock routing)
// =============================================================================

/// One delivery-agent mapping, as returned by `GET /api/mapping-livreur`.
///
/// The livraisons import uses these rows to route a spreadsheet line (agent
/// name) to the right stock (prestataire + ville + type).
#[derive(Debug, Clone, Deserialize)]
pub struct MappingLivreur {
    pub id: MappingLivreurId,
    #[serde(rename = "nomLivreur", default)]
    pub nom_livreur: String,
    #[serde(default)]
    pub prestataire: String,
    #[serde(default)]
    pub pays: Option<String>,
    #[serde(default)]
    pub ville: String,
    #[serde(rename = "typeStock", default)]
    pub type_stock: TypeStock,
}

/// Payload for creating or updating a mapping.
#[derive(Debug, Clone, Serialize)]
pub struct MappingLivreurInput {
    #[serde(rename = "nomLivreur")]
    pub nom_livreur: String,
    pub prestataire: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pays: Option<String>,
    pub ville: String,
    #[serde(rename = "typeStock")]
    pub type_stock: TypeStock,
}

// =============================================================================
// Auth
// =============================================================================

/// Response of `POST /api/auth/connexion`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "nomUtilisateur")]
    pub nom_utilisateur: String,
    pub role: Role,
}

/// Payload for `POST /api/auth/connexion`.
#[derive(Debug, Clone, Serialize)]
pub struct ConnexionRequest {
    #[serde(rename = "nomUtilisateur")]
    pub nom_utilisateur: String,
    #[serde(rename = "motDePasse")]
    pub mot_de_passe: String,
}

/// Payload for `POST /api/auth/inscription`.
#[derive(Debug, Clone, Serialize)]
pub struct InscriptionRequest {
    #[serde(rename = "nomUtilisateur")]
    pub nom_utilisateur: String,
    #[serde(rename = "motDePasse")]
    pub mot_de_passe: String,
    pub role: Role,
}

// =============================================================================
// Spreadsheet import
// =============================================================================

/// Envelope returned by the import endpoints:
/// `{ success, message, resultat: { totalImportes, totalIgnores, ... } }`.
/// Spreadsheet parsing happens backend-side; the webapp only uploads the
/// file and renders what comes back.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resultat: Option<ImportResultat>,
}

/// Counters and per-row details nested under `resultat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportResultat {
    #[serde(rename = "totalImportes", default)]
    pub total_importes: u64,
    #[serde(rename = "totalIgnores", default)]
    pub total_ignores: u64,
    /// Row details of the produits import.
    #[serde(default)]
    pub produits: Vec<ImportLigne>,
    /// Row details of the stocks import.
    #[serde(default)]
    pub stocks: Vec<ImportLigne>,
    /// The livraisons import reports its counters here instead of the
    /// `totalImportes`/`totalIgnores` pair.
    #[serde(rename = "statistiquesGlobales", default)]
    pub statistiques_globales: Option<StatistiquesGlobales>,
}

/// One processed spreadsheet row with its outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportLigne {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// Global counters of the livraisons import.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatistiquesGlobales {
    #[serde(rename = "totalLignesReussiesGlobal", default)]
    pub lignes_reussies: u64,
    #[serde(rename = "totalLignesEchoueesGlobal", default)]
    pub lignes_echouees: u64,
}

/// Render-ready import outcome, flattened from [`ImportResponse`].
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub message: String,
    pub imported: u64,
    pub skipped: u64,
    pub lignes: Vec<ImportLigne>,
}

impl ImportResponse {
    /// Flatten the envelope into the counters the result page renders.
    #[must_use]
    pub fn into_summary(self) -> ImportSummary {
        let resultat = self.resultat.unwrap_or_default();
        let (imported, skipped) = match &resultat.statistiques_globales {
            Some(stats) => (stats.lignes_reussies, stats.lignes_echouees),
            None => (resultat.total_importes, resultat.total_ignores),
        };
        let mut lignes = resultat.produits;
        lignes.extend(resultat.stocks);
        ImportSummary {
            message: self.message,
            imported,
            skipped,
            lignes,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_produit_contract() {
        // Legacy backend serializes reference as a JSON number
        let json = r#"{"id": 3, "reference": 1042, "nom": "Widget", "description": null, "seuilAlerte": 15}"#;
        let p: Produit = serde_json::from_str(json).unwrap();
        assert_eq!(p.reference.as_str(), "1042");
        assert_eq!(p.seuil_alerte, 15);
    }

    #[test]
    fn test_produit_defaults() {
        let p: Produit = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(p.reference.is_empty());
        assert_eq!(p.seuil_alerte, DEFAULT_SEUIL_ALERTE);
    }

    #[test]
    fn test_stock_contract() {
        let json = r#"{"id": 1, "nom": "A", "ville": "Casablanca", "pays": "Maroc", "typeStock": "ENTREPOT", "adresse": null, "actif": true}"#;
        let s: Stock = serde_json::from_str(json).unwrap();
        assert_eq!(s.pays.as_deref(), Some("Maroc"));
        assert_eq!(s.type_stock, entrepot_core::TypeStock::Entrepot);
    }

    #[test]
    fn test_affectation_contract() {
        let json = r#"{"produit": {"reference": "R1", "nom": "Widget"}, "quantite": 5}"#;
        let a: Affectation = serde_json::from_str(json).unwrap();
        assert_eq!(a.produit.reference.as_str(), "R1");
        assert_eq!(a.quantite, 5);
    }

    #[test]
    fn test_affectation_missing_quantity_is_zero() {
        let json = r#"{"produit": {"reference": "R1", "nom": "Widget"}}"#;
        let a: Affectation = serde_json::from_str(json).unwrap();
        assert_eq!(a.quantite, 0);
    }

    #[test]
    fn test_auth_response_contract() {
        let json = r#"{"token": "jwt", "nomUtilisateur": "amine", "role": "GESTIONNAIRE_STOCK"}"#;
        let r: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.nom_utilisateur, "amine");
        assert!(r.role.can_write());
    }

    #[test]
    fn test_mapping_livreur_contract() {
        let json = r#"{"id": 4, "nomLivreur": "Karim B", "prestataire": "Ecomub", "pays": "Maroc", "ville": "Casablanca", "typeStock": "REPRESENTANT"}"#;
        let m: MappingLivreur = serde_json::from_str(json).unwrap();
        assert_eq!(m.nom_livreur, "Karim B");
        assert_eq!(m.type_stock, entrepot_core::TypeStock::Representant);

        // Partial rows deserialize with defaults rather than failing
        let m: MappingLivreur = serde_json::from_str(r#"{"id": 5, "pays": null}"#).unwrap();
        assert!(m.nom_livreur.is_empty());
        assert!(m.pays.is_none());
    }

    #[test]
    fn test_import_produits_envelope() {
        // Counters live under "resultat", not at the top level
        let json = r#"{
            "success": true,
            "message": "Produits importés avec succès",
            "resultat": {
                "totalImportes": 7,
                "totalIgnores": 2,
                "produits": [
                    {"nom": "Widget", "reference": "1042", "status": "Importé avec succès"},
                    {"nom": "Gadget", "reference": "1043", "status": "Ignoré - Produit existant"}
                ]
            }
        }"#;
        let r: ImportResponse = serde_json::from_str(json).unwrap();
        let s = r.into_summary();
        assert_eq!(s.imported, 7);
        assert_eq!(s.skipped, 2);
        assert_eq!(s.message, "Produits importés avec succès");
        assert_eq!(s.lignes.len(), 2);
        assert_eq!(s.lignes[1].status, "Ignoré - Produit existant");
    }

    #[test]
    fn test_import_livraisons_counters_come_from_stats() {
        let json = r#"{
            "success": true,
            "message": "Fichier traité avec succès",
            "resultat": {
                "statistiquesGlobales": {
                    "totalLignesFichier": 12,
                    "totalLignesReussiesGlobal": 10,
                    "totalLignesEchoueesGlobal": 2
                },
                "statistiquesParPays": {},
                "resultatsParPays": {}
            }
        }"#;
        let s: ImportSummary = serde_json::from_str::<ImportResponse>(json)
            .unwrap()
            .into_summary();
        assert_eq!(s.imported, 10);
        assert_eq!(s.skipped, 2);
        assert!(s.lignes.is_empty());
    }

    #[test]
    fn test_import_missing_resultat_yields_zeroes() {
        let s = serde_json::from_str::<ImportResponse>(r#"{"success": false, "message": "boom"}"#)
            .unwrap()
            .into_summary();
        assert_eq!(s.imported, 0);
        assert_eq!(s.skipped, 0);
        assert_eq!(s.message, "boom");
    }
}
