//! Product catalog route handlers (CRUD over the API).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;

use entrepot_core::ProduitId;

use crate::api::{Produit, ProduitInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Product creation/update form data.
#[derive(Debug, Deserialize)]
pub struct ProduitForm {
    pub nom: String,
    pub reference: String,
    pub description: Option<String>,
    pub seuil_alerte: i64,
}

impl ProduitForm {
    fn into_input(self) -> Result<ProduitInput> {
        let nom = self.nom.trim().to_string();
        let reference = self.reference.trim().to_string();
        if nom.is_empty() {
            return Err(AppError::BadRequest("Le nom est requis.".to_string()));
        }
        if reference.is_empty() {
            return Err(AppError::BadRequest("La référence est requise.".to_string()));
        }
        if self.seuil_alerte < 0 {
            return Err(AppError::BadRequest(
                "Le seuil d'alerte doit être positif.".to_string(),
            ));
        }
        Ok(ProduitInput {
            nom,
            reference,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            seuil_alerte: self.seuil_alerte,
        })
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "produits/index.html")]
pub struct ProduitIndexTemplate {
    pub user: CurrentUser,
    pub produits: Vec<Produit>,
}

/// Product creation/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "produits/form.html")]
pub struct ProduitFormTemplate {
    pub user: CurrentUser,
    pub title: String,
    /// Form target: `/produits` to create, `/produits/{id}` to update.
    pub action: String,
    pub nom: String,
    pub reference: String,
    pub description: String,
    pub seuil_alerte: i64,
}

impl ProduitFormTemplate {
    fn blank(user: CurrentUser) -> Self {
        Self {
            user,
            title: "Nouveau produit".to_string(),
            action: "/produits".to_string(),
            nom: String::new(),
            reference: String::new(),
            description: String::new(),
            seuil_alerte: crate::api::DEFAULT_SEUIL_ALERTE,
        }
    }

    fn edit(user: CurrentUser, produit: Produit) -> Self {
        Self {
            user,
            title: format!("Modifier {}", produit.nom),
            action: format!("/produits/{}", produit.id),
            nom: produit.nom,
            reference: produit.reference.as_str().to_string(),
            description: produit.description.unwrap_or_default(),
            seuil_alerte: produit.seuil_alerte,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /produits - List the product catalog.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<ProduitIndexTemplate> {
    let produits = state.stocks().get_produits(&user.token).await?;
    Ok(ProduitIndexTemplate { user, produits })
}

/// GET /produits/new - Render the creation form.
pub async fn new_form(RequireAuth(user): RequireAuth) -> ProduitFormTemplate {
    ProduitFormTemplate::blank(user)
}

/// POST /produits - Create a product.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ProduitForm>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    let produit = state.stocks().create_produit(&user.token, &input).await?;
    tracing::info!(produit_id = %produit.id, "Product created");
    Ok(Redirect::to("/produits"))
}

/// GET /produits/{id}/edit - Render the edit form.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ProduitId>,
) -> Result<ProduitFormTemplate> {
    let produit = state.stocks().get_produit(&user.token, id).await?;
    Ok(ProduitFormTemplate::edit(user, produit))
}

/// POST /produits/{id} - Update a product.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ProduitId>,
    Form(form): Form<ProduitForm>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    state.stocks().update_produit(&user.token, id, &input).await?;
    tracing::info!(produit_id = %id, "Product updated");
    Ok(Redirect::to("/produits"))
}

/// POST /produits/{id}/delete - Delete a product.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ProduitId>,
) -> Result<Redirect> {
    state.stocks().delete_produit(&user.token, id).await?;
    tracing::info!(produit_id = %id, "Product deleted");
    Ok(Redirect::to("/produits"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_trims_and_validates() {
        let form = ProduitForm {
            nom: "  Widget  ".to_string(),
            reference: " REF-1 ".to_string(),
            description: Some("   ".to_string()),
            seuil_alerte: 10,
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.nom, "Widget");
        assert_eq!(input.reference, "REF-1");
        assert!(input.description.is_none());
    }

    #[test]
    fn test_form_rejects_blank_reference() {
        let form = ProduitForm {
            nom: "Widget".to_string(),
            reference: "   ".to_string(),
            description: None,
            seuil_alerte: 10,
        };
        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_form_rejects_negative_threshold() {
        let form = ProduitForm {
            nom: "Widget".to_string(),
            reference: "R1".to_string(),
            description: None,
            seuil_alerte: -1,
        };
        assert!(form.into_input().is_err());
    }
}
