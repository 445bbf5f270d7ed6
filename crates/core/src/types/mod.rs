//! Core types for Entrepot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod reference;
pub mod role;
pub mod stock_type;

pub use id::*;
pub use reference::Reference;
pub use role::Role;
pub use stock_type::TypeStock;
