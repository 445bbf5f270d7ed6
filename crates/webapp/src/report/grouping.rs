//! Hierarchical grouping of stock contents by location.
//!
//! Transforms the flat (stock × affectation) data into the
//! country → city → stock → product tree. Ordering is deterministic:
//! byte-wise string comparison at every level (countries, cities, stocks
//! by name, products by reference).

use std::collections::{BTreeMap, HashMap};

use entrepot_core::StockId;

use crate::api::Stock;

use super::{ReportSource, UNKNOWN_CITY, UNKNOWN_COUNTRY, UNKNOWN_PRODUCT_NAME};

/// One product row inside a stock group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub reference: String,
    pub nom: String,
    pub quantite: i64,
}

/// One stock and its product rows. May be empty; empty stocks stay
/// visible in the on-screen table (but not in the export).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockGroup {
    pub stock_id: StockId,
    pub stock_nom: String,
    pub produits: Vec<ProductRow>,
}

/// All stocks of one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityGroup {
    pub ville: String,
    pub stocks: Vec<StockGroup>,
}

/// All cities of one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryGroup {
    pub pays: String,
    pub villes: Vec<CityGroup>,
}

/// Resolve a stock's country, defaulting when empty or missing.
fn resolve_pays(stock: &Stock) -> String {
    match stock.pays.as_deref() {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => UNKNOWN_COUNTRY.to_string(),
    }
}

/// Resolve a stock's city, defaulting when empty or missing.
fn resolve_ville(stock: &Stock) -> String {
    match stock.ville.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN_CITY.to_string(),
    }
}

/// Build the three-level tree from a settled load cycle.
///
/// Stocks whose content fetch failed are excluded entirely; stocks with an
/// empty (but successfully fetched) content list appear as empty buckets.
/// Every content row lands in exactly one (country, city, stock) bucket.
#[must_use]
pub fn build_tree(source: &ReportSource, lookup: &HashMap<String, String>) -> Vec<CountryGroup> {
    // BTreeMaps give the deterministic country/city ordering for free.
    let mut grouped: BTreeMap<String, BTreeMap<String, Vec<StockGroup>>> = BTreeMap::new();

    for stock in &source.stocks {
        let Some(affectations) = source.contents.get(&stock.id) else {
            // Content fetch failed for this stock
            continue;
        };

        let mut produits: Vec<ProductRow> = affectations
            .iter()
            .map(|row| {
                let reference = row.produit.reference.as_str().to_string();
                let nom = lookup
                    .get(&reference)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string());
                ProductRow {
                    reference,
                    nom,
                    quantite: row.quantite.max(0),
                }
            })
            .collect();
        produits.sort_by(|a, b| a.reference.cmp(&b.reference));

        grouped
            .entry(resolve_pays(stock))
            .or_default()
            .entry(resolve_ville(stock))
            .or_default()
            .push(StockGroup {
                stock_id: stock.id,
                stock_nom: stock.nom.clone(),
                produits,
            });
    }

    grouped
        .into_iter()
        .map(|(pays, villes)| CountryGroup {
            pays,
            villes: villes
                .into_iter()
                .map(|(ville, mut stocks)| {
                    stocks.sort_by(|a, b| a.stock_nom.cmp(&b.stock_nom));
                    CityGroup { ville, stocks }
                })
                .collect(),
        })
        .collect()
}

/// Restrict the tree to one country, or pass through for the "all"
/// sentinel.
#[must_use]
pub fn filter_country(tree: Vec<CountryGroup>, selected: &str) -> Vec<CountryGroup> {
    if selected == super::ALL_COUNTRIES {
        return tree;
    }
    tree.into_iter().filter(|c| c.pays == selected).collect()
}

/// Distinct countries present in the stock list, sorted.
///
/// Derived from the stock list alone, not the tree: a country whose every
/// stock failed to fetch content is still selectable (and yields an empty
/// filtered tree).
#[must_use]
pub fn country_options(stocks: &[Stock]) -> Vec<String> {
    let mut countries: Vec<String> = stocks
        .iter()
        .map(resolve_pays)
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    countries.sort();
    countries
}

/// Total number of product rows in the tree, across all buckets.
#[must_use]
pub fn total_rows(tree: &[CountryGroup]) -> usize {
    tree.iter()
        .flat_map(|c| &c.villes)
        .flat_map(|v| &v.stocks)
        .map(|s| s.produits.len())
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::{Affectation, ProduitRef};
    use entrepot_core::{Reference, TypeStock};

    fn stock(id: i64, nom: &str, ville: &str, pays: &str) -> Stock {
        Stock {
            id: StockId::new(id),
            nom: nom.to_string(),
            adresse: None,
            pays: (!pays.is_empty()).then(|| pays.to_string()),
            ville: (!ville.is_empty()).then(|| ville.to_string()),
            type_stock: TypeStock::Entrepot,
            actif: true,
            prestataire: None,
        }
    }

    fn affectation(reference: &str, quantite: i64) -> Affectation {
        Affectation {
            produit: ProduitRef {
                id: None,
                reference: Reference::new(reference),
                nom: String::new(),
                seuil_alerte: 30,
            },
            quantite,
        }
    }

    fn source_with(
        stocks: Vec<Stock>,
        contents: Vec<(i64, Vec<Affectation>)>,
    ) -> ReportSource {
        let mut source = ReportSource {
            stocks,
            ..Default::default()
        };
        for (id, rows) in contents {
            source.contents.insert(StockId::new(id), rows);
        }
        source
    }

    fn lookup_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(r, n)| ((*r).to_string(), (*n).to_string()))
            .collect()
    }

    #[test]
    fn test_single_stock_scenario() {
        // stocks=[{1, Maroc, Casablanca, A}], produits=[{R1, Widget}], contents={1:[{R1,5}]}
        let source = source_with(
            vec![stock(1, "A", "Casablanca", "Maroc")],
            vec![(1, vec![affectation("R1", 5)])],
        );
        let lookup = lookup_of(&[("R1", "Widget")]);

        let tree = build_tree(&source, &lookup);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].pays, "Maroc");
        assert_eq!(tree[0].villes.len(), 1);
        assert_eq!(tree[0].villes[0].ville, "Casablanca");
        assert_eq!(tree[0].villes[0].stocks.len(), 1);

        let group = &tree[0].villes[0].stocks[0];
        assert_eq!(group.stock_nom, "A");
        assert_eq!(
            group.produits,
            vec![ProductRow {
                reference: "R1".to_string(),
                nom: "Widget".to_string(),
                quantite: 5,
            }]
        );
    }

    #[test]
    fn test_every_row_lands_in_exactly_one_bucket() {
        let source = source_with(
            vec![
                stock(1, "A", "Casablanca", "Maroc"),
                stock(2, "B", "Casablanca", "Maroc"),
                stock(3, "C", "Paris", "France"),
            ],
            vec![
                (1, vec![affectation("R1", 1), affectation("R2", 2)]),
                (2, vec![affectation("R3", 3)]),
                (3, vec![affectation("R1", 4)]),
            ],
        );
        let tree = build_tree(&source, &HashMap::new());
        assert_eq!(total_rows(&tree), 4);
    }

    #[test]
    fn test_failed_stock_excluded() {
        let mut source = source_with(
            vec![
                stock(1, "A", "Casablanca", "Maroc"),
                stock(2, "B", "Casablanca", "Maroc"),
            ],
            vec![(1, vec![affectation("R1", 1)])],
        );
        source.failed_stocks.insert(StockId::new(2));

        let tree = build_tree(&source, &HashMap::new());
        assert_eq!(total_rows(&tree), 1);
        assert_eq!(tree[0].villes[0].stocks.len(), 1);
    }

    #[test]
    fn test_empty_stock_keeps_bucket() {
        let source = source_with(vec![stock(1, "A", "Casablanca", "Maroc")], vec![(1, vec![])]);
        let tree = build_tree(&source, &HashMap::new());
        assert_eq!(tree.len(), 1);
        assert!(tree[0].villes[0].stocks[0].produits.is_empty());
    }

    #[test]
    fn test_unknown_placeholders() {
        let source = source_with(
            vec![stock(1, "A", "", "")],
            vec![(1, vec![affectation("R9", 2)])],
        );
        let tree = build_tree(&source, &HashMap::new());
        assert_eq!(tree[0].pays, UNKNOWN_COUNTRY);
        assert_eq!(tree[0].villes[0].ville, UNKNOWN_CITY);
        assert_eq!(tree[0].villes[0].stocks[0].produits[0].nom, UNKNOWN_PRODUCT_NAME);
    }

    #[test]
    fn test_deterministic_ordering() {
        let source = source_with(
            vec![
                stock(1, "Zeta", "Rabat", "Maroc"),
                stock(2, "Alpha", "Rabat", "Maroc"),
                stock(3, "Mid", "Agadir", "Maroc"),
                stock(4, "Solo", "Lyon", "France"),
            ],
            vec![
                (1, vec![affectation("R2", 1), affectation("R1", 1)]),
                (2, vec![]),
                (3, vec![]),
                (4, vec![]),
            ],
        );

        let first = build_tree(&source, &HashMap::new());
        let second = build_tree(&source, &HashMap::new());
        assert_eq!(first, second);

        // Countries alphabetical
        assert_eq!(first[0].pays, "France");
        assert_eq!(first[1].pays, "Maroc");
        // Cities alphabetical within country
        assert_eq!(first[1].villes[0].ville, "Agadir");
        assert_eq!(first[1].villes[1].ville, "Rabat");
        // Stocks alphabetical within city
        assert_eq!(first[1].villes[1].stocks[0].stock_nom, "Alpha");
        assert_eq!(first[1].villes[1].stocks[1].stock_nom, "Zeta");
        // Products by reference within stock
        let produits = &first[1].villes[1].stocks[1].produits;
        assert_eq!(produits[0].reference, "R1");
        assert_eq!(produits[1].reference, "R2");
    }

    #[test]
    fn test_filter_country_passthrough_and_restrict() {
        let source = source_with(
            vec![
                stock(1, "A", "Casablanca", "Maroc"),
                stock(2, "B", "Lyon", "France"),
            ],
            vec![(1, vec![]), (2, vec![])],
        );
        let tree = build_tree(&source, &HashMap::new());

        let all = filter_country(tree.clone(), super::super::ALL_COUNTRIES);
        assert_eq!(all.len(), 2);

        let maroc = filter_country(tree.clone(), "Maroc");
        assert_eq!(maroc.len(), 1);
        assert_eq!(maroc[0].pays, "Maroc");

        // Filter idempotence: "all" then a country == that country directly
        let via_all = filter_country(filter_country(tree.clone(), super::super::ALL_COUNTRIES), "Maroc");
        assert_eq!(via_all, maroc);

        let absent = filter_country(tree, "Espagne");
        assert!(absent.is_empty());
    }

    #[test]
    fn test_country_options_ignore_content_failures() {
        let mut source = source_with(
            vec![
                stock(1, "A", "Casablanca", "Maroc"),
                stock(2, "B", "Lyon", "France"),
                stock(3, "C", "", ""),
            ],
            vec![(1, vec![])],
        );
        // France's only stock failed; it must still be selectable
        source.failed_stocks.insert(StockId::new(2));

        let options = country_options(&source.stocks);
        assert_eq!(options, vec!["France", "Maroc", UNKNOWN_COUNTRY]);
    }

    #[test]
    fn test_negative_quantity_clamped() {
        let source = source_with(
            vec![stock(1, "A", "Casablanca", "Maroc")],
            vec![(1, vec![affectation("R1", -3)])],
        );
        let tree = build_tree(&source, &HashMap::new());
        assert_eq!(tree[0].villes[0].stocks[0].produits[0].quantite, 0);
    }
}
