//! Location stock report engine.
//!
//! Builds the country → city → stock → product report from three API
//! collections (products, stocks, per-stock affectations) and serves two
//! consumers: the merged-cell HTML table and the spreadsheet export.
//!
//! # Pipeline
//!
//! 1. [`fetch::load_all`] - gather the three collections; partial failures
//!    are recorded, never fatal
//! 2. [`lookup::build_product_lookup`] - reference → display name
//! 3. [`grouping::build_tree`] - flat rows into the three-level hierarchy
//! 4. [`grouping::filter_country`] - restrict to one country (or "all")
//! 5. [`spans::compute_spans`] - rowspan counts for the merged-cell table
//! 6. [`rows::flatten`] / [`export`] - render-ready rows and xlsx bytes
//!
//! The tree is rebuilt from scratch on every request; there is no cached
//! or incrementally-updated state, so a new fetch cycle can never observe
//! (or overwrite) a previous one.

pub mod export;
pub mod fetch;
pub mod grouping;
pub mod lookup;
pub mod rows;
pub mod spans;

pub use fetch::{ReportSource, load_all};
pub use grouping::{
    CityGroup, CountryGroup, ProductRow, StockGroup, build_tree, country_options, filter_country,
};
pub use lookup::build_product_lookup;
pub use rows::{ReportRow, SpanCell, flatten, has_product_rows};
pub use spans::{SpanLookup, compute_spans};

/// Sentinel country selection meaning "no filter".
pub const ALL_COUNTRIES: &str = "all";

/// Placeholder country for stocks without one.
pub const UNKNOWN_COUNTRY: &str = "Pays Inconnu";

/// Placeholder city for stocks without one.
pub const UNKNOWN_CITY: &str = "Ville Inconnue";

/// Placeholder name for products missing from the catalog lookup.
pub const UNKNOWN_PRODUCT_NAME: &str = "Nom inconnu";
