//! Rowspan calculation for the merged-cell report table.
//!
//! The HTML table merges the country, city, and stock cells vertically
//! across their descendant product rows. Spans are computed over the
//! filtered tree so the numbers always match what is rendered.

use std::collections::HashMap;

use entrepot_core::StockId;

use super::CountryGroup;

/// Span counts keyed by country, country+city, and country+city+stock
/// composite keys.
#[derive(Debug, Default)]
pub struct SpanLookup {
    pays: HashMap<String, usize>,
    ville: HashMap<String, usize>,
    stock: HashMap<String, usize>,
}

impl SpanLookup {
    fn ville_key(pays: &str, ville: &str) -> String {
        format!("{pays}-{ville}")
    }

    fn stock_key(pays: &str, ville: &str, stock_id: StockId) -> String {
        format!("{pays}-{ville}-{stock_id}")
    }

    /// Rows spanned by a country cell.
    #[must_use]
    pub fn pays_span(&self, pays: &str) -> usize {
        self.pays.get(pays).copied().unwrap_or(1)
    }

    /// Rows spanned by a city cell.
    #[must_use]
    pub fn ville_span(&self, pays: &str, ville: &str) -> usize {
        self.ville
            .get(&Self::ville_key(pays, ville))
            .copied()
            .unwrap_or(1)
    }

    /// Rows spanned by a stock cell.
    #[must_use]
    pub fn stock_span(&self, pays: &str, ville: &str, stock_id: StockId) -> usize {
        self.stock
            .get(&Self::stock_key(pays, ville, stock_id))
            .copied()
            .unwrap_or(1)
    }
}

/// Compute all span counts for a (filtered) tree.
///
/// Invariants: `span(stock) == max(1, product rows)` (an empty stock still
/// renders one placeholder row); city and country spans are the sums of
/// their children.
#[must_use]
pub fn compute_spans(tree: &[CountryGroup]) -> SpanLookup {
    let mut spans = SpanLookup::default();

    for country in tree {
        let mut pays_rows = 0;
        for city in &country.villes {
            let mut ville_rows = 0;
            for group in &city.stocks {
                let stock_rows = group.produits.len().max(1);
                spans.stock.insert(
                    SpanLookup::stock_key(&country.pays, &city.ville, group.stock_id),
                    stock_rows,
                );
                ville_rows += stock_rows;
            }
            spans
                .ville
                .insert(SpanLookup::ville_key(&country.pays, &city.ville), ville_rows);
            pays_rows += ville_rows;
        }
        spans.pays.insert(country.pays.clone(), pays_rows);
    }

    spans
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::report::{CityGroup, ProductRow, StockGroup};

    fn product(reference: &str) -> ProductRow {
        ProductRow {
            reference: reference.to_string(),
            nom: "X".to_string(),
            quantite: 1,
        }
    }

    fn group(id: i64, nom: &str, produits: Vec<ProductRow>) -> StockGroup {
        StockGroup {
            stock_id: StockId::new(id),
            stock_nom: nom.to_string(),
            produits,
        }
    }

    #[test]
    fn test_single_product_spans() {
        let tree = vec![CountryGroup {
            pays: "Maroc".to_string(),
            villes: vec![CityGroup {
                ville: "Casablanca".to_string(),
                stocks: vec![group(1, "A", vec![product("R1")])],
            }],
        }];

        let spans = compute_spans(&tree);
        assert_eq!(spans.stock_span("Maroc", "Casablanca", StockId::new(1)), 1);
        assert_eq!(spans.ville_span("Maroc", "Casablanca"), 1);
        assert_eq!(spans.pays_span("Maroc"), 1);
    }

    #[test]
    fn test_empty_stock_spans_one() {
        let tree = vec![CountryGroup {
            pays: "Maroc".to_string(),
            villes: vec![CityGroup {
                ville: "Casablanca".to_string(),
                stocks: vec![group(1, "A", vec![])],
            }],
        }];

        let spans = compute_spans(&tree);
        assert_eq!(spans.stock_span("Maroc", "Casablanca", StockId::new(1)), 1);
        assert_eq!(spans.ville_span("Maroc", "Casablanca"), 1);
    }

    #[test]
    fn test_city_span_sums_stocks() {
        // Two stocks in one city: 2 products + 1 product -> city span 3
        let tree = vec![CountryGroup {
            pays: "Maroc".to_string(),
            villes: vec![CityGroup {
                ville: "Casablanca".to_string(),
                stocks: vec![
                    group(1, "A", vec![product("R1"), product("R2")]),
                    group(2, "B", vec![product("R3")]),
                ],
            }],
        }];

        let spans = compute_spans(&tree);
        assert_eq!(spans.stock_span("Maroc", "Casablanca", StockId::new(1)), 2);
        assert_eq!(spans.stock_span("Maroc", "Casablanca", StockId::new(2)), 1);
        assert_eq!(spans.ville_span("Maroc", "Casablanca"), 3);
        assert_eq!(spans.pays_span("Maroc"), 3);
    }

    #[test]
    fn test_country_span_sums_cities() {
        let tree = vec![CountryGroup {
            pays: "Maroc".to_string(),
            villes: vec![
                CityGroup {
                    ville: "Agadir".to_string(),
                    stocks: vec![group(1, "A", vec![product("R1")])],
                },
                CityGroup {
                    ville: "Casablanca".to_string(),
                    stocks: vec![group(2, "B", vec![]), group(3, "C", vec![product("R2")])],
                },
            ],
        }];

        let spans = compute_spans(&tree);
        assert_eq!(spans.ville_span("Maroc", "Agadir"), 1);
        assert_eq!(spans.ville_span("Maroc", "Casablanca"), 2);
        assert_eq!(spans.pays_span("Maroc"), 3);
    }

    #[test]
    fn test_same_city_name_in_two_countries() {
        // Composite keys keep homonym cities apart
        let tree = vec![
            CountryGroup {
                pays: "France".to_string(),
                villes: vec![CityGroup {
                    ville: "Valence".to_string(),
                    stocks: vec![group(1, "A", vec![product("R1"), product("R2")])],
                }],
            },
            CountryGroup {
                pays: "Espagne".to_string(),
                villes: vec![CityGroup {
                    ville: "Valence".to_string(),
                    stocks: vec![group(2, "B", vec![product("R3")])],
                }],
            },
        ];

        let spans = compute_spans(&tree);
        assert_eq!(spans.ville_span("France", "Valence"), 2);
        assert_eq!(spans.ville_span("Espagne", "Valence"), 1);
    }
}
