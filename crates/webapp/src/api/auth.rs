//! Authentication operations.
//!
//! The webapp never mints tokens itself: it forwards credentials to the API
//! and stores the returned JWT in the server-side session.

use tracing::instrument;

use super::{ApiError, AuthResponse, ConnexionRequest, InscriptionRequest, StocksClient};

impl StocksClient {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` on bad credentials, or another
    /// variant if the request fails.
    #[instrument(skip(self, request), fields(nom_utilisateur = %request.nom_utilisateur))]
    pub async fn connexion(&self, request: &ConnexionRequest) -> Result<AuthResponse, ApiError> {
        self.post_public("/api/auth/connexion", request).await
    }

    /// Register a new user account.
    ///
    /// # Errors
    ///
    /// Returns error if the username is taken or the request fails.
    #[instrument(skip(self, request), fields(nom_utilisateur = %request.nom_utilisateur))]
    pub async fn inscription(&self, request: &InscriptionRequest) -> Result<AuthResponse, ApiError> {
        self.post_public("/api/auth/inscription", request).await
    }
}
