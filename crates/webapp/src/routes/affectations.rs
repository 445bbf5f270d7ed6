//! Affectation route handlers.
//!
//! Assign, adjust, and remove product quantities in a stock. All actions
//! redirect back to the stock detail page they were submitted from. The
//! alert page lists every product-in-stock row below a threshold.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use entrepot_core::{ProduitId, StockId};

use crate::api::{DEFAULT_SEUIL_ALERTE, StockFaibleRow};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Assign form data.
#[derive(Debug, Deserialize)]
pub struct AffecterForm {
    pub produit_id: ProduitId,
    pub stock_id: StockId,
    pub quantite: i64,
}

/// Quantity change form data.
#[derive(Debug, Deserialize)]
pub struct ModifierForm {
    pub produit_id: ProduitId,
    pub stock_id: StockId,
    pub quantite: i64,
}

/// Removal form data.
#[derive(Debug, Deserialize)]
pub struct AnnulerForm {
    pub produit_id: ProduitId,
    pub stock_id: StockId,
}

/// Query parameters for the alert page.
#[derive(Debug, Deserialize)]
pub struct AlertesQuery {
    pub seuil: Option<i64>,
}

// =============================================================================
// Templates
// =============================================================================

/// Low-stock alert page template.
#[derive(Template, WebTemplate)]
#[template(path = "alertes.html")]
pub struct AlertesTemplate {
    pub user: CurrentUser,
    pub seuil: i64,
    pub rows: Vec<StockFaibleRow>,
}

// =============================================================================
// Handlers
// =============================================================================

fn check_quantity(quantite: i64) -> Result<()> {
    if quantite < 0 {
        return Err(AppError::BadRequest(
            "La quantité doit être positive.".to_string(),
        ));
    }
    Ok(())
}

/// POST /affectations/affecter - Assign a quantity of a product to a stock.
pub async fn affecter(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AffecterForm>,
) -> Result<Redirect> {
    check_quantity(form.quantite)?;
    state
        .stocks()
        .affecter_produit(&user.token, form.produit_id, form.stock_id, form.quantite)
        .await?;
    tracing::info!(produit_id = %form.produit_id, stock_id = %form.stock_id, "Product assigned");
    Ok(Redirect::to(&format!("/stocks/{}", form.stock_id)))
}

/// POST /affectations/modifier - Replace an assigned quantity.
pub async fn modifier(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ModifierForm>,
) -> Result<Redirect> {
    check_quantity(form.quantite)?;
    state
        .stocks()
        .modifier_quantite(&user.token, form.produit_id, form.stock_id, form.quantite)
        .await?;
    tracing::info!(produit_id = %form.produit_id, stock_id = %form.stock_id, "Quantity changed");
    Ok(Redirect::to(&format!("/stocks/{}", form.stock_id)))
}

/// POST /affectations/annuler - Remove a product's assignment.
pub async fn annuler(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AnnulerForm>,
) -> Result<Redirect> {
    state
        .stocks()
        .annuler_affectation(&user.token, form.produit_id, form.stock_id)
        .await?;
    tracing::info!(produit_id = %form.produit_id, stock_id = %form.stock_id, "Assignment removed");
    Ok(Redirect::to(&format!("/stocks/{}", form.stock_id)))
}

/// GET /alertes - List rows below the threshold (default 30).
pub async fn alertes(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<AlertesQuery>,
) -> Result<AlertesTemplate> {
    let seuil = query.seuil.unwrap_or(DEFAULT_SEUIL_ALERTE);
    if seuil < 0 {
        return Err(AppError::BadRequest(
            "Le seuil doit être positif.".to_string(),
        ));
    }

    let rows = state.stocks().get_stock_faible(&user.token, seuil).await?;
    Ok(AlertesTemplate { user, seuil, rows })
}
