//! Spreadsheet export of the location stock report.
//!
//! Flattens the filtered tree to one row per (stock, product) pair and
//! serializes it to an xlsx workbook. Unlike the on-screen table, stocks
//! with no products contribute no rows.

use rust_xlsxwriter::{Workbook, XlsxError};

use super::CountryGroup;

/// Worksheet name.
pub const SHEET_NAME: &str = "Rapport Stock Detaille";

/// Header row, in column order.
pub const HEADERS: [&str; 6] = [
    "Pays",
    "Ville",
    "Stock",
    "Référence Produit",
    "Nom Produit",
    "Quantité",
];

/// Minimum column width in characters.
const MIN_COLUMN_WIDTH: usize = 10;

/// Padding added to the widest cell of each column.
const COLUMN_PADDING: usize = 2;

/// One body row of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub pays: String,
    pub ville: String,
    pub stock_nom: String,
    pub reference: String,
    pub nom: String,
    pub quantite: i64,
}

impl ExportRow {
    fn column(&self, index: usize) -> String {
        match index {
            0 => self.pays.clone(),
            1 => self.ville.clone(),
            2 => self.stock_nom.clone(),
            3 => self.reference.clone(),
            4 => self.nom.clone(),
            _ => self.quantite.to_string(),
        }
    }
}

/// Flatten a (filtered) tree to export rows, skipping empty stocks.
#[must_use]
pub fn flatten_rows(tree: &[CountryGroup]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for country in tree {
        for city in &country.villes {
            for group in &city.stocks {
                for produit in &group.produits {
                    rows.push(ExportRow {
                        pays: country.pays.clone(),
                        ville: city.ville.clone(),
                        stock_nom: group.stock_nom.clone(),
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

/// Column width in characters: widest cell (header included), floored and
/// padded.
fn column_widths(rows: &[ExportRow]) -> [usize; 6] {
    let mut widths = [0usize; 6];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in rows {
        for (i, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(row.column(i).chars().count());
        }
    }
    widths.map(|w| w.max(MIN_COLUMN_WIDTH - COLUMN_PADDING) + COLUMN_PADDING)
}

/// Serialize export rows to xlsx bytes.
///
/// Callers must not pass an empty row set; the report route checks first
/// and surfaces a message instead of producing an empty workbook.
///
/// # Errors
///
/// Returns error if workbook serialization fails.
pub fn build_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)] // 6 columns
        worksheet.write_string(0, col as u16, *header)?;
    }

    let mut row_index: u32 = 1;
    for row in rows {
        worksheet.write_string(row_index, 0, &row.pays)?;
        worksheet.write_string(row_index, 1, &row.ville)?;
        worksheet.write_string(row_index, 2, &row.stock_nom)?;
        worksheet.write_string(row_index, 3, &row.reference)?;
        worksheet.write_string(row_index, 4, &row.nom)?;
        #[allow(clippy::cast_precision_loss)] // quantities are far below 2^53
        worksheet.write_number(row_index, 5, row.quantite as f64)?;
        row_index += 1;
    }

    for (col, width) in column_widths(rows).iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)] // 6 columns
        #[allow(clippy::cast_precision_loss)]
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    workbook.save_to_buffer()
}

/// Build the download filename for a selection and date.
///
/// Pattern: `rapport_stock_<country-or-tous_pays>_<YYYY-MM-DD>.xlsx`, with
/// non-alphanumeric characters of the country replaced by `_`.
#[must_use]
pub fn export_filename(selected: &str, date: chrono::NaiveDate) -> String {
    let suffix = if selected == super::ALL_COUNTRIES {
        "tous_pays".to_string()
    } else {
        selected
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    format!("rapport_stock_{suffix}_{}.xlsx", date.format("%Y-%m-%d"))
}
