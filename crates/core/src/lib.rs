//! Entrepot Core - Shared types library.
//!
//! This crate provides common types used by the Entrepot components:
//! - `webapp` - Server-rendered management panel over the stock API
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, product references, and
//!   domain enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
