//! Spreadsheet import operations.
//!
//! The file passes through unmodified; parsing and validation stay
//! backend-side. The webapp only renders the returned counters.

use tracing::instrument;

use super::{ApiError, ImportResponse, ImportSummary, StocksClient};

/// Which import endpoint a file should be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Produits,
    Stocks,
    Livraisons,
}

impl ImportKind {
    /// API path for this import kind.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Produits => "/api/import/produits",
            Self::Stocks => "/api/import/stocks",
            Self::Livraisons => "/api/import/livraisons",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Produits => "Produits",
            Self::Stocks => "Stocks",
            Self::Livraisons => "Livraisons",
        }
    }

    /// URL segment used by the webapp's own upload routes.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Produits => "produits",
            Self::Stocks => "stocks",
            Self::Livraisons => "livraisons",
        }
    }
}

impl StocksClient {
    /// Upload a spreadsheet to one of the import endpoints.
    ///
    /// # Errors
    ///
    /// Returns error if the upload is rejected or the API request fails.
    #[instrument(skip(self, token, bytes), fields(kind = ?kind, filename = %filename, size = bytes.len()))]
    pub async fn import_spreadsheet(
        &self,
        token: &str,
        kind: ImportKind,
        filename: String,
        bytes: Vec<u8>,
    ) -> Result<ImportSummary, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .map_err(|e| ApiError::Parse(format!("Invalid upload part: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response: ImportResponse = self.post_multipart(token, kind.path(), form).await?;
        Ok(response.into_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_paths() {
        assert_eq!(ImportKind::Produits.path(), "/api/import/produits");
        assert_eq!(ImportKind::Stocks.path(), "/api/import/stocks");
        assert_eq!(ImportKind::Livraisons.path(), "/api/import/livraisons");
    }
}
