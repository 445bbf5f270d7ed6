//! Typed client for the stock management REST API.
//!
//! The API (a separate service) owns all persistence and business rules;
//! this client is the webapp's only data source. All endpoints speak JSON
//! over HTTP and, except for login, require a per-user bearer token that
//! the webapp keeps in the session.
//!
//! # Endpoints
//!
//! - Auth:         `POST /api/auth/connexion`, `POST /api/auth/inscription`
//! - Produits:     `GET|POST /api/produits`, `GET|PUT|DELETE /api/produits/{id}`
//! - Stocks:       `GET|POST /api/stocks`, `GET|PUT|DELETE /api/stocks/{id}`
//! - Affectations: `GET /api/produit-stock/stock/{id}/produits`,
//!                 `POST /api/produit-stock/affecter`,
//!                 `PUT /api/produit-stock/modifier-quantite`,
//!                 `DELETE /api/produit-stock/annuler-affectation`,
//!                 `GET /api/produit-stock/stock-faible`
//! - Mappings:     `GET|POST /api/mapping-livreur`,
//!                 `GET|PUT|DELETE /api/mapping-livreur/{id}`
//! - Import:       `POST /api/import/{produits,stocks,livraisons}`

mod affectations;
mod auth;
mod import;
mod livreurs;
mod produits;
mod stocks;
pub mod types;

pub use import::ImportKind;
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::StocksApiConfig;

/// Errors that can occur when interacting with the stock management API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status with a message body.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Bearer token missing, expired, or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Token valid but the role lacks the required authority.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the documented contract.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Stock management API client.
///
/// Cheap to clone (`Arc` inner). Authentication is per request: every
/// method that hits a protected endpoint takes the caller's bearer token,
/// so one shared client serves all logged-in users.
#[derive(Clone)]
pub struct StocksClient {
    inner: Arc<StocksClientInner>,
}

struct StocksClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl StocksClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StocksApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            inner: Arc::new(StocksClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL of the API (without trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Execute an authenticated GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: serde::Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated POST request carrying only query parameters.
    ///
    /// The affectation endpoints take their arguments as query parameters
    /// with an empty body.
    pub(crate) async fn post_query<T: DeserializeOwned, Q: serde::Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated PUT request carrying only query parameters.
    pub(crate) async fn put_query<T: DeserializeOwned, Q: serde::Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated DELETE request, optionally with query
    /// parameters. Treats any 2xx (including 204) as success.
    pub(crate) async fn delete<Q: serde::Serialize + Sync>(
        &self,
        token: &str,
        path: &str,
        query: Option<&Q>,
    ) -> Result<(), ApiError> {
        let mut request = self.inner.client.delete(self.url(path)).bearer_auth(token);
        if let Some(q) = query {
            request = request.query(q);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Execute an unauthenticated POST request (login, registration).
    pub(crate) async fn post_public<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute an authenticated multipart POST (spreadsheet upload).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse an error response.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        if status == 401 {
            return ApiError::Unauthorized;
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // The backend wraps most errors as {"message": "...", "success": false}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        match status {
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Api { status, message },
        }
    }
}

impl std::fmt::Debug for StocksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StocksClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client() -> StocksClient {
        StocksClient::new(&StocksApiConfig {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
        })
        .unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = test_client();
        assert_eq!(
            client.url("/api/produits"),
            "http://localhost:8080/api/produits"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("stock 9".to_string());
        assert_eq!(err.to_string(), "Not found: stock 9");

        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_debug_omits_internals() {
        let out = format!("{:?}", test_client());
        assert!(out.contains("http://localhost:8080"));
    }
}
