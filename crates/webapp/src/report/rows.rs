//! Flattening of the report tree into render-ready table rows.
//!
//! The template consumes a flat list of rows where the merged country,
//! city, and stock cells appear only on the first row of their group,
//! carrying the rowspan computed by [`super::spans`]. Keeping this logic
//! out of the template keeps the template a plain loop.

use super::{CountryGroup, SpanLookup};

/// A vertically merged cell: present only on the first row of its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanCell {
    pub text: String,
    pub rowspan: usize,
}

/// One `<tr>` of the report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Country cell, first row of the country only.
    pub pays: Option<SpanCell>,
    /// City cell, first row of the city only.
    pub ville: Option<SpanCell>,
    /// Stock cell, first row of the stock only.
    pub stock: Option<SpanCell>,
    /// Placeholder row for a stock with no products.
    pub empty_stock: bool,
    pub reference: String,
    pub nom: String,
    pub quantite: i64,
}

/// Flatten a (filtered) tree into table rows, one per product plus one
/// placeholder per empty stock.
#[must_use]
pub fn flatten(tree: &[CountryGroup], spans: &SpanLookup) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    for country in tree {
        let mut first_of_pays = true;
        for city in &country.villes {
            let mut first_of_ville = true;
            for group in &city.stocks {
                let pays_cell = |first: &mut bool| {
                    std::mem::take(first).then(|| SpanCell {
                        text: country.pays.clone(),
                        rowspan: spans.pays_span(&country.pays),
                    })
                };
                let ville_cell = |first: &mut bool| {
                    std::mem::take(first).then(|| SpanCell {
                        text: city.ville.clone(),
                        rowspan: spans.ville_span(&country.pays, &city.ville),
                    })
                };

                if group.produits.is_empty() {
                    rows.push(ReportRow {
                        pays: pays_cell(&mut first_of_pays),
                        ville: ville_cell(&mut first_of_ville),
                        stock: Some(SpanCell {
                            text: group.stock_nom.clone(),
                            rowspan: 1,
                        }),
                        empty_stock: true,
                        reference: String::new(),
                        nom: String::new(),
                        quantite: 0,
                    });
                    continue;
                }

                let mut first_of_stock = true;
                for produit in &group.produits {
                    let stock = std::mem::take(&mut first_of_stock).then(|| SpanCell {
                        text: group.stock_nom.clone(),
                        rowspan: spans.stock_span(&country.pays, &city.ville, group.stock_id),
                    });
                    rows.push(ReportRow {
                        pays: pays_cell(&mut first_of_pays),
                        ville: ville_cell(&mut first_of_ville),
                        stock,
                        empty_stock: false,
                        reference: produit.reference.clone(),
                        nom: produit.nom.clone(),
                        quantite: produit.quantite,
                    });
                }
            }
        }
    }

    rows
}

/// Whether any row would survive the export. Placeholder rows for empty
/// stocks are screen-only, so a tree of empty stocks exports nothing.
#[must_use]
pub fn has_product_rows(rows: &[ReportRow]) -> bool {
    rows.iter().any(|r| !r.empty_stock)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::report::spans::compute_spans;
    use crate::report::{CityGroup, ProductRow, StockGroup};
    use entrepot_core::StockId;

    fn tree_two_stocks() -> Vec<CountryGroup> {
        vec![CountryGroup {
            pays: "Maroc".to_string(),
            villes: vec![CityGroup {
                ville: "Casablanca".to_string(),
                stocks: vec![
                    StockGroup {
                        stock_id: StockId::new(1),
                        stock_nom: "A".to_string(),
                        produits: vec![
                            ProductRow {
                                reference: "R1".to_string(),
                                nom: "Widget".to_string(),
                                quantite: 5,
                            },
                            ProductRow {
                                reference: "R2".to_string(),
                                nom: "Gadget".to_string(),
                                quantite: 2,
                            },
                        ],
                    },
                    StockGroup {
                        stock_id: StockId::new(2),
                        stock_nom: "B".to_string(),
                        produits: vec![],
                    },
                ],
            }],
        }]
    }

    #[test]
    fn test_merged_cells_only_on_first_row() {
        let tree = tree_two_stocks();
        let spans = compute_spans(&tree);
        let rows = flatten(&tree, &spans);

        assert_eq!(rows.len(), 3);

        // First row carries all three merged cells
        assert_eq!(rows[0].pays.as_ref().unwrap().rowspan, 3);
        assert_eq!(rows[0].ville.as_ref().unwrap().rowspan, 3);
        assert_eq!(rows[0].stock.as_ref().unwrap().rowspan, 2);
        assert_eq!(rows[0].reference, "R1");

        // Second row of the same stock carries none
        assert!(rows[1].pays.is_none());
        assert!(rows[1].ville.is_none());
        assert!(rows[1].stock.is_none());
        assert_eq!(rows[1].reference, "R2");

        // Empty stock: new stock cell, placeholder row
        let empty = &rows[2];
        assert!(empty.empty_stock);
        assert_eq!(empty.stock.as_ref().unwrap().text, "B");
        assert_eq!(empty.stock.as_ref().unwrap().rowspan, 1);
        assert!(empty.pays.is_none());
    }

    #[test]
    fn test_row_count_matches_spans() {
        let tree = tree_two_stocks();
        let spans = compute_spans(&tree);
        let rows = flatten(&tree, &spans);
        // Total rendered rows == country span (placeholder included)
        assert_eq!(rows.len(), spans.pays_span("Maroc"));
    }

    #[test]
    fn test_placeholder_only_rows_are_not_exportable() {
        let tree = vec![CountryGroup {
            pays: "Maroc".to_string(),
            villes: vec![CityGroup {
                ville: "Casablanca".to_string(),
                stocks: vec![StockGroup {
                    stock_id: StockId::new(1),
                    stock_nom: "A".to_string(),
                    produits: vec![],
                }],
            }],
        }];
        let spans = compute_spans(&tree);
        let rows = flatten(&tree, &spans);

        // One visible placeholder row, nothing to export
        assert_eq!(rows.len(), 1);
        assert!(!has_product_rows(&rows));

        let full = tree_two_stocks();
        let full_rows = flatten(&full, &compute_spans(&full));
        assert!(has_product_rows(&full_rows));
    }

    #[test]
    fn test_empty_tree_flattens_to_nothing() {
        let tree: Vec<CountryGroup> = Vec::new();
        let spans = compute_spans(&tree);
        assert!(flatten(&tree, &spans).is_empty());
    }
}
