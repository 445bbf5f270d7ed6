//! Stock location route handlers (CRUD over the API).
//!
//! The detail page also lists the stock's affectations, flagging rows
//! whose quantity sits below the product's alert threshold.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;

use entrepot_core::{StockId, TypeStock};

use crate::api::{Affectation, Stock, StockInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Stock creation/update form data.
#[derive(Debug, Deserialize)]
pub struct StockForm {
    pub nom: String,
    pub adresse: Option<String>,
    pub pays: Option<String>,
    pub ville: Option<String>,
    pub type_stock: String,
    /// Checkbox: present ("on") when checked, absent otherwise.
    pub actif: Option<String>,
    pub prestataire: Option<String>,
}

impl StockForm {
    fn into_input(self) -> Result<StockInput> {
        let nom = self.nom.trim().to_string();
        if nom.is_empty() {
            return Err(AppError::BadRequest("Le nom est requis.".to_string()));
        }

        let type_stock = parse_type_stock(&self.type_stock)?;
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        Ok(StockInput {
            nom,
            adresse: clean(self.adresse),
            pays: clean(self.pays),
            ville: clean(self.ville),
            type_stock,
            actif: self.actif.is_some(),
            prestataire: clean(self.prestataire),
        })
    }
}

fn parse_type_stock(raw: &str) -> Result<TypeStock> {
    TypeStock::all()
        .into_iter()
        .find(|t| t.wire_value() == raw)
        .ok_or_else(|| AppError::BadRequest(format!("Type de stock inconnu : {raw}")))
}

// =============================================================================
// View Types
// =============================================================================

/// One affectation row of the detail page, with its low-stock flag.
pub struct AffectationView {
    /// Missing only on malformed rows; row actions need it.
    pub produit_id: Option<entrepot_core::ProduitId>,
    pub reference: String,
    pub nom: String,
    pub quantite: i64,
    pub seuil_alerte: i64,
    pub low: bool,
}

impl AffectationView {
    fn from_affectation(a: Affectation) -> Self {
        let low = a.quantite < a.produit.seuil_alerte;
        Self {
            produit_id: a.produit.id,
            reference: a.produit.reference.as_str().to_string(),
            nom: a.produit.nom,
            quantite: a.quantite,
            seuil_alerte: a.produit.seuil_alerte,
            low,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Stock listing template.
#[derive(Template, WebTemplate)]
#[template(path = "stocks/index.html")]
pub struct StockIndexTemplate {
    pub user: CurrentUser,
    pub stocks: Vec<Stock>,
}

/// Stock creation/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "stocks/form.html")]
pub struct StockFormTemplate {
    pub user: CurrentUser,
    pub title: String,
    /// Form target: `/stocks` to create, `/stocks/{id}` to update.
    pub action: String,
    pub nom: String,
    pub adresse: String,
    pub pays: String,
    pub ville: String,
    pub type_stock: TypeStock,
    pub actif: bool,
    pub prestataire: String,
    pub type_options: [TypeStock; 3],
}

impl StockFormTemplate {
    fn blank(user: CurrentUser) -> Self {
        Self {
            user,
            title: "Nouveau stock".to_string(),
            action: "/stocks".to_string(),
            nom: String::new(),
            adresse: String::new(),
            pays: String::new(),
            ville: String::new(),
            type_stock: TypeStock::Entrepot,
            actif: true,
            prestataire: String::new(),
            type_options: TypeStock::all(),
        }
    }

    fn edit(user: CurrentUser, stock: Stock) -> Self {
        Self {
            user,
            title: format!("Modifier {}", stock.nom),
            action: format!("/stocks/{}", stock.id),
            nom: stock.nom,
            adresse: stock.adresse.unwrap_or_default(),
            pays: stock.pays.unwrap_or_default(),
            ville: stock.ville.unwrap_or_default(),
            type_stock: stock.type_stock,
            actif: stock.actif,
            prestataire: stock.prestataire.unwrap_or_default(),
            type_options: TypeStock::all(),
        }
    }
}

/// Stock detail template with the affectation workbench.
#[derive(Template, WebTemplate)]
#[template(path = "stocks/show.html")]
pub struct StockShowTemplate {
    pub user: CurrentUser,
    pub stock: Stock,
    pub affectations: Vec<AffectationView>,
    /// Catalog for the "assign a product" select.
    pub produits: Vec<crate::api::Produit>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /stocks - List the stock locations.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<StockIndexTemplate> {
    let stocks = state.stocks().get_stocks(&user.token).await?;
    Ok(StockIndexTemplate { user, stocks })
}

/// GET /stocks/new - Render the creation form.
pub async fn new_form(RequireAuth(user): RequireAuth) -> StockFormTemplate {
    StockFormTemplate::blank(user)
}

/// POST /stocks - Create a stock.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<StockForm>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    let stock = state.stocks().create_stock(&user.token, &input).await?;
    tracing::info!(stock_id = %stock.id, "Stock created");
    Ok(Redirect::to("/stocks"))
}

/// GET /stocks/{id} - Detail page with affectations and the catalog.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
) -> Result<StockShowTemplate> {
    let client = state.stocks();
    let token = user.token.as_str();

    let (stock, affectations, produits) = tokio::join!(
        client.get_stock(token, id),
        client.get_affectations(token, id),
        client.get_produits(token),
    );

    let stock = stock?;
    let affectations = affectations?
        .into_iter()
        .map(AffectationView::from_affectation)
        .collect();
    // The assign form degrades to a hint when the catalog is unavailable
    let produits = match produits {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "Product catalog unavailable on stock page");
            Vec::new()
        }
    };

    Ok(StockShowTemplate {
        user,
        stock,
        affectations,
        produits,
    })
}

/// GET /stocks/{id}/edit - Render the edit form.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
) -> Result<StockFormTemplate> {
    let stock = state.stocks().get_stock(&user.token, id).await?;
    Ok(StockFormTemplate::edit(user, stock))
}

/// POST /stocks/{id} - Update a stock.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
    Form(form): Form<StockForm>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    state.stocks().update_stock(&user.token, id, &input).await?;
    tracing::info!(stock_id = %id, "Stock updated");
    Ok(Redirect::to(&format!("/stocks/{id}")))
}

/// POST /stocks/{id}/delete - Delete a stock.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
) -> Result<Redirect> {
    state.stocks().delete_stock(&user.token, id).await?;
    tracing::info!(stock_id = %id, "Stock deleted");
    Ok(Redirect::to("/stocks"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base_form() -> StockForm {
        StockForm {
            nom: "Entrepot Casa".to_string(),
            adresse: None,
            pays: Some(" Maroc ".to_string()),
            ville: Some("Casablanca".to_string()),
            type_stock: "ENTREPOT".to_string(),
            actif: Some("on".to_string()),
            prestataire: Some(String::new()),
        }
    }

    #[test]
    fn test_form_parses_type_and_checkbox() {
        let input = base_form().into_input().unwrap();
        assert_eq!(input.type_stock, TypeStock::Entrepot);
        assert!(input.actif);
        assert_eq!(input.pays.as_deref(), Some("Maroc"));
        assert!(input.prestataire.is_none());
    }

    #[test]
    fn test_unchecked_checkbox_means_inactive() {
        let mut form = base_form();
        form.actif = None;
        assert!(!form.into_input().unwrap().actif);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut form = base_form();
        form.type_stock = "GARAGE".to_string();
        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_low_flag_uses_product_threshold() {
        let a: Affectation = serde_json::from_str(
            r#"{"produit": {"reference": "R1", "nom": "W", "seuilAlerte": 10}, "quantite": 9}"#,
        )
        .unwrap();
        assert!(AffectationView::from_affectation(a).low);
    }
}
