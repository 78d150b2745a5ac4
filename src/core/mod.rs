//! Core JWK types and operations.
//!
//! This module provides the fundamental building blocks:
//!
//! - [`error`] - Error types for JWK operations
//! - [`jwa`] - Algorithm capability traits and the concrete algorithms
//! - [`registry`] - Per key type algorithm registries
//! - [`selection`] - Algorithm selection rules
//! - [`params`] - JWK parameters and their schema
//! - [`jwk`] - Key types (`oct`, `OKP`)

pub mod error;
pub mod jwa;
pub mod jwk;
pub mod params;
mod random;
pub mod registry;
pub mod selection;

// Re-export commonly used items
pub use error::{JwkError, JwkResult};
pub use jwk::{EncryptOutput, Jwk, SymmetricJwk};
#[cfg(feature = "okp")]
pub use jwk::{OkpCurve, OkpJwk};
pub use params::{JwkParameter, JwkParams, ParamKind};
