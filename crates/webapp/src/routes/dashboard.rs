//! Dashboard route handler.
//!
//! One KPI overview page. Each card degrades independently: a failed
//! count renders as a dash instead of taking the whole page down.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::api::DEFAULT_SEUIL_ALERTE;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: CurrentUser,
    /// Product catalog size, if the fetch succeeded.
    pub produit_count: Option<usize>,
    /// Stock location count, if the fetch succeeded.
    pub stock_count: Option<usize>,
    /// Active stock count, if the fetch succeeded.
    pub stock_actif_count: Option<usize>,
    /// Rows under the default alert threshold, if the fetch succeeded.
    pub alerte_count: Option<usize>,
    /// Whether the alert card should be highlighted.
    pub alerte_warning: bool,
}

/// GET / - Render the dashboard.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> DashboardTemplate {
    let client = state.stocks();
    let token = user.token.as_str();

    let (produits, stocks, alertes) = tokio::join!(
        client.get_produits(token),
        client.get_stocks(token),
        client.get_stock_faible(token, DEFAULT_SEUIL_ALERTE),
    );

    let produit_count = match produits {
        Ok(list) => Some(list.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard product count unavailable");
            None
        }
    };

    let (stock_count, stock_actif_count) = match stocks {
        Ok(list) => {
            let actifs = list.iter().filter(|s| s.actif).count();
            (Some(list.len()), Some(actifs))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard stock counts unavailable");
            (None, None)
        }
    };

    let alerte_count = match alertes {
        Ok(list) => Some(list.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard alert count unavailable");
            None
        }
    };

    DashboardTemplate {
        user,
        produit_count,
        stock_count,
        stock_actif_count,
        alerte_count,
        alerte_warning: alerte_count.is_some_and(|n| n > 0),
    }
}
