//! User roles.

use serde::{Deserialize, Serialize};

/// Role granted to an authenticated user by the stock management API.
///
/// The API embeds the role in the auth response and enforces it on every
/// endpoint; the webapp only uses it for display and to hide controls the
/// API would reject anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full stock management access.
    GestionnaireStock,
    /// Read-only access.
    Consultation,
}

impl Role {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::GestionnaireStock => "Gestionnaire de stock",
            Self::Consultation => "Consultation",
        }
    }

    /// Whether this role may modify products, stocks, and affectations.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        matches!(self, Self::GestionnaireStock)
    }
}
