//! Location stock report route handlers.
//!
//! The page runs one load cycle against the API, groups everything into
//! the country > city > stock > product tree, and renders it with
//! vertically merged cells. The export endpoint reruns the cycle and
//! streams the filtered tree as an xlsx download, skipping empty stocks.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::report::{
    ALL_COUNTRIES, ReportRow, build_product_lookup, build_tree, compute_spans, country_options,
    export, filter_country, flatten, has_product_rows, load_all,
};
use crate::state::AppState;

/// xlsx MIME type.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Query parameters shared by the page and the export.
#[derive(Debug, Deserialize)]
pub struct RapportQuery {
    /// Selected country, or "all".
    pub pays: Option<String>,
    /// One-shot message shown after a redirect (e.g. refused empty export).
    pub message: Option<String>,
}

/// Report page template.
#[derive(Template, WebTemplate)]
#[template(path = "rapport/index.html")]
pub struct RapportTemplate {
    pub user: CurrentUser,
    /// Accumulated fetch error banner, if any sub-fetch failed.
    pub error_banner: Option<String>,
    /// One-shot informational message.
    pub message: Option<String>,
    /// Distinct countries for the filter select.
    pub countries: Vec<String>,
    /// Currently selected country ("all" or a country name).
    pub selected: String,
    /// Render-ready table rows for the filtered tree.
    pub rows: Vec<ReportRow>,
    /// Whether the export link is live (placeholder rows export nothing).
    pub has_export_rows: bool,
}

/// GET /rapport - Render the report page.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<RapportQuery>,
) -> RapportTemplate {
    let selected = query
        .pays
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ALL_COUNTRIES.to_string());

    let source = load_all(state.stocks(), &user.token).await;
    let lookup = build_product_lookup(&source.produits);
    let countries = country_options(&source.stocks);
    let tree = filter_country(build_tree(&source, &lookup), &selected);
    let spans = compute_spans(&tree);
    let rows = flatten(&tree, &spans);
    let has_export_rows = has_product_rows(&rows);

    RapportTemplate {
        error_banner: source.error_banner(),
        message: query.message,
        countries,
        selected,
        rows,
        has_export_rows,
        user,
    }
}

/// GET /rapport/export - Download the filtered report as xlsx.
///
/// An export with no product rows (everything filtered out, or only empty
/// stocks) is refused with a message instead of producing an empty file.
pub async fn export(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<RapportQuery>,
) -> Result<Response> {
    let selected = query
        .pays
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ALL_COUNTRIES.to_string());

    let source = load_all(state.stocks(), &user.token).await;
    let lookup = build_product_lookup(&source.produits);
    let tree = filter_country(build_tree(&source, &lookup), &selected);
    let rows = export::flatten_rows(&tree);

    if rows.is_empty() {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("pays", &selected)
            .append_pair("message", "Aucune donnée à exporter pour cette sélection.")
            .finish();
        return Ok(Redirect::to(&format!("/rapport?{query}")).into_response());
    }

    let bytes = export::build_workbook(&rows)
        .map_err(|e| AppError::Internal(format!("xlsx serialization failed: {e}")))?;

    let today = chrono::Utc::now().date_naive();
    let filename = export::export_filename(&selected, today);
    tracing::info!(%filename, rows = rows.len(), "Report exported");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );
    // The filename is sanitized to ASCII alphanumerics and underscores
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(format!("invalid content-disposition: {e}")))?,
    );

    Ok((headers, bytes).into_response())
}
