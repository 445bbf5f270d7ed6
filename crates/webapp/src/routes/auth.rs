//! Authentication route handlers.
//!
//! Login and registration delegate credential checking to the stock API;
//! on success the returned bearer token is stored server-side in the
//! session and never reaches the browser.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use entrepot_core::Role;

use crate::api::{ApiError, ConnexionRequest, InscriptionRequest};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub nom_utilisateur: String,
    pub mot_de_passe: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub nom_utilisateur: String,
    pub mot_de_passe: String,
    pub mot_de_passe_confirm: String,
    pub role: String,
}

/// Query parameters for error display on the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub expired: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /auth/login - Render the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> LoginTemplate {
    let error = if query.expired.is_some() {
        Some("Session expirée, veuillez vous reconnecter.".to_string())
    } else {
        query.error
    };
    LoginTemplate { error }
}

/// POST /auth/login - Check credentials against the API and open a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let request = ConnexionRequest {
        nom_utilisateur: form.nom_utilisateur.trim().to_string(),
        mot_de_passe: form.mot_de_passe,
    };

    if request.nom_utilisateur.is_empty() || request.mot_de_passe.is_empty() {
        return LoginTemplate {
            error: Some("Nom d'utilisateur et mot de passe requis.".to_string()),
        }
        .into_response();
    }

    match state.stocks().connexion(&request).await {
        Ok(auth) => {
            // New identity, new session ID
            session.cycle_id().await.ok();

            let user = CurrentUser {
                token: auth.token,
                nom_utilisateur: auth.nom_utilisateur,
                role: auth.role,
            };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!(error = %e, "Failed to store session user");
                return LoginTemplate {
                    error: Some("Erreur interne, veuillez réessayer.".to_string()),
                }
                .into_response();
            }

            set_sentry_user(&user.nom_utilisateur);
            tracing::info!(user = %user.nom_utilisateur, "User logged in");
            Redirect::to("/").into_response()
        }
        Err(ApiError::Unauthorized | ApiError::Forbidden(_)) => LoginTemplate {
            error: Some("Identifiants invalides.".to_string()),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Login request failed");
            LoginTemplate {
                error: Some("Le service d'authentification est indisponible.".to_string()),
            }
            .into_response()
        }
    }
}

/// GET /auth/register - Render the registration page.
pub async fn register_page() -> RegisterTemplate {
    RegisterTemplate { error: None }
}

/// POST /auth/register - Create an account via the API and open a session.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.mot_de_passe != form.mot_de_passe_confirm {
        return RegisterTemplate {
            error: Some("Les mots de passe ne correspondent pas.".to_string()),
        }
        .into_response();
    }

    let role = match form.role.as_str() {
        "GESTIONNAIRE_STOCK" => Role::GestionnaireStock,
        _ => Role::Consultation,
    };

    let request = InscriptionRequest {
        nom_utilisateur: form.nom_utilisateur.trim().to_string(),
        mot_de_passe: form.mot_de_passe,
        role,
    };

    if request.nom_utilisateur.is_empty() || request.mot_de_passe.is_empty() {
        return RegisterTemplate {
            error: Some("Nom d'utilisateur et mot de passe requis.".to_string()),
        }
        .into_response();
    }

    match state.stocks().inscription(&request).await {
        Ok(auth) => {
            session.cycle_id().await.ok();

            let user = CurrentUser {
                token: auth.token,
                nom_utilisateur: auth.nom_utilisateur,
                role: auth.role,
            };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!(error = %e, "Failed to store session user");
                return RegisterTemplate {
                    error: Some("Erreur interne, veuillez réessayer.".to_string()),
                }
                .into_response();
            }

            set_sentry_user(&user.nom_utilisateur);
            tracing::info!(user = %user.nom_utilisateur, "User registered");
            Redirect::to("/").into_response()
        }
        Err(ApiError::Api { message, .. }) => RegisterTemplate {
            error: Some(message),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Registration request failed");
            RegisterTemplate {
                error: Some("Le service d'authentification est indisponible.".to_string()),
            }
            .into_response()
        }
    }
}

/// POST /auth/logout - Drop the session and return to the login page.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "Failed to clear session user");
    }
    session.flush().await.ok();
    clear_sentry_user();
    Redirect::to("/auth/login")
}
