//! Product name lookup.

use std::collections::HashMap;

use crate::api::Produit;

/// Placeholder for a catalog entry without a display name.
const NAMELESS_PRODUCT: &str = "Nom Inconnu";

/// Build the reference → display name lookup from the product catalog.
///
/// Pure function of its input. Entries with an empty reference are
/// skipped; duplicate references are last-write-wins, matching the
/// backend's own uniqueness guarantee (duplicates mean upstream data
/// drift, not an error here).
#[must_use]
pub fn build_product_lookup(produits: &[Produit]) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(produits.len());
    for produit in produits {
        if produit.reference.is_empty() {
            continue;
        }
        let nom = if produit.nom.is_empty() {
            NAMELESS_PRODUCT.to_string()
        } else {
            produit.nom.clone()
        };
        map.insert(produit.reference.as_str().to_string(), nom);
    }
    map
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use entrepot_core::{ProduitId, Reference};

    fn produit(id: i64, reference: &str, nom: &str) -> Produit {
        Produit {
            id: ProduitId::new(id),
            reference: Reference::new(reference),
            nom: nom.to_string(),
            description: None,
            seuil_alerte: 30,
        }
    }

    #[test]
    fn test_basic_lookup() {
        let lookup = build_product_lookup(&[produit(1, "R1", "Widget")]);
        assert_eq!(lookup.get("R1").unwrap(), "Widget");
    }

    #[test]
    fn test_empty_reference_skipped() {
        let lookup = build_product_lookup(&[produit(1, "", "Ghost")]);
        assert!(lookup.is_empty());
    }

    #[test]
    fn test_duplicate_reference_last_write_wins() {
        let lookup = build_product_lookup(&[
            produit(1, "R1", "Old name"),
            produit(2, "R1", "New name"),
        ]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("R1").unwrap(), "New name");
    }

    #[test]
    fn test_nameless_product_placeholder() {
        let lookup = build_product_lookup(&[produit(1, "R1", "")]);
        assert_eq!(lookup.get("R1").unwrap(), NAMELESS_PRODUCT);
    }
}
