//! HTTP route handlers for the webapp.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Dashboard
//! GET  /health                  - Health check (in main)
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! GET  /auth/register           - Registration page
//! POST /auth/register           - Registration action
//! POST /auth/logout             - Logout action
//!
//! # Produits
//! GET  /produits                - Product catalog
//! GET  /produits/new            - Creation form
//! POST /produits                - Create
//! GET  /produits/{id}/edit      - Edit form
//! POST /produits/{id}           - Update
//! POST /produits/{id}/delete    - Delete
//!
//! # Stocks
//! GET  /stocks                  - Stock list
//! GET  /stocks/new              - Creation form
//! POST /stocks                  - Create
//! GET  /stocks/{id}             - Detail with affectations
//! GET  /stocks/{id}/edit        - Edit form
//! POST /stocks/{id}             - Update
//! POST /stocks/{id}/delete      - Delete
//!
//! # Affectations
//! POST /affectations/affecter   - Assign a product to a stock
//! POST /affectations/modifier   - Change an assigned quantity
//! POST /affectations/annuler    - Remove an assignment
//! GET  /alertes                 - Low-stock rows (?seuil=)
//!
//! # Mappings livreurs
//! GET  /livreurs                - Mapping list (?q= filter)
//! GET  /livreurs/new            - Creation form
//! POST /livreurs                - Create
//! GET  /livreurs/{id}/edit      - Edit form
//! POST /livreurs/{id}           - Update
//! POST /livreurs/{id}/delete    - Delete
//!
//! # Rapport
//! GET  /rapport                 - Location stock report (?pays=)
//! GET  /rapport/export          - xlsx download (?pays=)
//!
//! # Import
//! GET  /import                  - Upload forms
//! POST /import/{kind}           - Upload one spreadsheet
//! ```

pub mod affectations;
pub mod auth;
pub mod dashboard;
pub mod import;
pub mod livreurs;
pub mod produits;
pub mod rapport;
pub mod stocks;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router (everything except /health and static
/// file serving, which main wires up).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/auth", auth_routes())
        .nest("/produits", produit_routes())
        .nest("/stocks", stock_routes())
        .nest("/affectations", affectation_routes())
        .nest("/livreurs", livreur_routes())
        .route("/alertes", get(affectations::alertes))
        .route("/rapport", get(rapport::index))
        .route("/rapport/export", get(rapport::export))
        .route("/import", get(import::index))
        .route("/import/{kind}", post(import::upload))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

fn produit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(produits::index).post(produits::create))
        .route("/new", get(produits::new_form))
        .route("/{id}/edit", get(produits::edit_form))
        .route("/{id}", post(produits::update))
        .route("/{id}/delete", post(produits::delete))
}

fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stocks::index).post(stocks::create))
        .route("/new", get(stocks::new_form))
        .route("/{id}", get(stocks::show).post(stocks::update))
        .route("/{id}/edit", get(stocks::edit_form))
        .route("/{id}/delete", post(stocks::delete))
}

fn livreur_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(livreurs::index).post(livreurs::create))
        .route("/new", get(livreurs::new_form))
        .route("/{id}/edit", get(livreurs::edit_form))
        .route("/{id}", post(livreurs::update))
        .route("/{id}/delete", post(livreurs::delete))
}

fn affectation_routes() -> Router<AppState> {
    Router::new()
        .route("/affecter", post(affectations::affecter))
        .route("/modifier", post(affectations::modifier))
        .route("/annuler", post(affectations::annuler))
}
