//! Domain models for the webapp.
//!
//! The stock API owns all persistent state; the only model the webapp
//! itself carries is the session-stored identity.

pub mod session;

pub use session::{CurrentUser, keys as session_keys};
