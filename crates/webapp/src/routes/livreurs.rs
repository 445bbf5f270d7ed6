//! Delivery-agent mapping route handlers (CRUD over the API).
//!
//! The listing page filters the full mapping list with a case-insensitive
//! substring match on agent name, prestataire, and city; the API has no
//! list-level search of its own.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;

use entrepot_core::{MappingLivreurId, TypeStock};

use crate::api::{MappingLivreur, MappingLivreurInput};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Mapping creation/update form data.
#[derive(Debug, Deserialize)]
pub struct MappingForm {
    pub nom_livreur: String,
    pub prestataire: String,
    pub pays: Option<String>,
    pub ville: String,
    pub type_stock: String,
}

impl MappingForm {
    fn into_input(self) -> Result<MappingLivreurInput> {
        let nom_livreur = self.nom_livreur.trim().to_string();
        let prestataire = self.prestataire.trim().to_string();
        let ville = self.ville.trim().to_string();
        if nom_livreur.is_empty() {
            return Err(AppError::BadRequest(
                "Le nom du livreur est requis.".to_string(),
            ));
        }
        if prestataire.is_empty() {
            return Err(AppError::BadRequest(
                "Le prestataire est requis.".to_string(),
            ));
        }
        if ville.is_empty() {
            return Err(AppError::BadRequest("La ville est requise.".to_string()));
        }

        let type_stock = TypeStock::all()
            .into_iter()
            .find(|t| t.wire_value() == self.type_stock)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Type de stock inconnu : {}", self.type_stock))
            })?;

        Ok(MappingLivreurInput {
            nom_livreur,
            prestataire,
            pays: self
                .pays
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            ville,
            type_stock,
        })
    }
}

/// Query parameters for the listing filter.
#[derive(Debug, Deserialize)]
pub struct MappingQuery {
    pub q: Option<String>,
}

/// Case-insensitive substring match on the searchable mapping fields.
fn matches_filter(mapping: &MappingLivreur, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    mapping.nom_livreur.to_lowercase().contains(&needle)
        || mapping.prestataire.to_lowercase().contains(&needle)
        || mapping.ville.to_lowercase().contains(&needle)
}

// =============================================================================
// Templates
// =============================================================================

/// Mapping listing template.
#[derive(Template, WebTemplate)]
#[template(path = "livreurs/index.html")]
pub struct MappingIndexTemplate {
    pub user: CurrentUser,
    /// Current filter term, echoed back into the search box.
    pub q: String,
    pub mappings: Vec<MappingLivreur>,
}

/// Mapping creation/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "livreurs/form.html")]
pub struct MappingFormTemplate {
    pub user: CurrentUser,
    pub title: String,
    /// Form target: `/livreurs` to create, `/livreurs/{id}` to update.
    pub action: String,
    pub nom_livreur: String,
    pub prestataire: String,
    pub pays: String,
    pub ville: String,
    pub type_stock: TypeStock,
    pub type_options: [TypeStock; 3],
}

impl MappingFormTemplate {
    fn blank(user: CurrentUser) -> Self {
        Self {
            user,
            title: "Nouveau mapping livreur".to_string(),
            action: "/livreurs".to_string(),
            nom_livreur: String::new(),
            prestataire: String::new(),
            pays: String::new(),
            ville: String::new(),
            type_stock: TypeStock::Entrepot,
            type_options: TypeStock::all(),
        }
    }

    fn edit(user: CurrentUser, mapping: MappingLivreur) -> Self {
        Self {
            user,
            title: format!("Modifier {}", mapping.nom_livreur),
            action: format!("/livreurs/{}", mapping.id),
            nom_livreur: mapping.nom_livreur,
            prestataire: mapping.prestataire,
            pays: mapping.pays.unwrap_or_default(),
            ville: mapping.ville,
            type_stock: mapping.type_stock,
            type_options: TypeStock::all(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /livreurs - List the mappings, filtered by `?q=`.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MappingQuery>,
) -> Result<MappingIndexTemplate> {
    let q = query.q.unwrap_or_default().trim().to_string();
    let mut mappings = state.stocks().get_mappings(&user.token).await?;
    if !q.is_empty() {
        mappings.retain(|m| matches_filter(m, &q));
    }
    Ok(MappingIndexTemplate { user, q, mappings })
}

/// GET /livreurs/new - Render the creation form.
pub async fn new_form(RequireAuth(user): RequireAuth) -> MappingFormTemplate {
    MappingFormTemplate::blank(user)
}

/// POST /livreurs - Create a mapping.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<MappingForm>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    let mapping = state.stocks().create_mapping(&user.token, &input).await?;
    tracing::info!(mapping_id = %mapping.id, "Mapping created");
    Ok(Redirect::to("/livreurs"))
}

/// GET /livreurs/{id}/edit - Render the edit form.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MappingLivreurId>,
) -> Result<MappingFormTemplate> {
    let mapping = state.stocks().get_mapping(&user.token, id).await?;
    Ok(MappingFormTemplate::edit(user, mapping))
}

/// POST /livreurs/{id} - Update a mapping.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MappingLivreurId>,
    Form(form): Form<MappingForm>,
) -> Result<Redirect> {
    let input = form.into_input()?;
    state.stocks().update_mapping(&user.token, id, &input).await?;
    tracing::info!(mapping_id = %id, "Mapping updated");
    Ok(Redirect::to("/livreurs"))
}

/// POST /livreurs/{id}/delete - Delete a mapping.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MappingLivreurId>,
) -> Result<Redirect> {
    state.stocks().delete_mapping(&user.token, id).await?;
    tracing::info!(mapping_id = %id, "Mapping deleted");
    Ok(Redirect::to("/livreurs"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mapping(nom: &str, prestataire: &str, ville: &str) -> MappingLivreur {
        MappingLivreur {
            id: MappingLivreurId::new(1),
            nom_livreur: nom.to_string(),
            prestataire: prestataire.to_string(),
            pays: Some("Maroc".to_string()),
            ville: ville.to_string(),
            type_stock: TypeStock::Entrepot,
        }
    }

    #[test]
    fn test_filter_matches_any_searchable_field() {
        let m = mapping("Karim B", "Ecomub", "Casablanca");
        assert!(matches_filter(&m, "karim"));
        assert!(matches_filter(&m, "ECOMUB"));
        assert!(matches_filter(&m, "casa"));
        assert!(!matches_filter(&m, "rabat"));
    }

    #[test]
    fn test_form_requires_livreur_prestataire_ville() {
        let form = MappingForm {
            nom_livreur: "  ".to_string(),
            prestataire: "Ecomub".to_string(),
            pays: None,
            ville: "Casablanca".to_string(),
            type_stock: "ENTREPOT".to_string(),
        };
        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_form_parses_type_and_trims() {
        let form = MappingForm {
            nom_livreur: " Karim B ".to_string(),
            prestataire: "LMT".to_string(),
            pays: Some(String::new()),
            ville: "Rabat".to_string(),
            type_stock: "ENTREPOT".to_string(),
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.nom_livreur, "Karim B");
        assert_eq!(input.type_stock, TypeStock::Entrepot);
        assert!(input.pays.is_none());
    }
}
