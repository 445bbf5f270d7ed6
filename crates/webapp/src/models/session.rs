//! Session-related types.
//!
//! Types stored in the session for authentication state. The API bearer
//! token lives here, server-side, and is never exposed to the browser.

use serde::{Deserialize, Serialize};

use entrepot_core::Role;

/// Session-stored user identity.
///
/// Holds the bearer token returned by the stock API at login plus the
/// display fields needed by the layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Bearer token for the stock API.
    pub token: String,
    /// Username as known to the API.
    pub nom_utilisateur: String,
    /// Role controlling write access.
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may create, modify, or delete data.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        self.role.can_write()
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for a one-shot flash message shown after a redirect.
    pub const FLASH: &str = "flash";
}
