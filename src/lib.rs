//! Strongly typed JSON Web Keys (JWK) with algorithm selection.
//!
//! This crate represents keys in the JWK model (RFC 7517) and runs every
//! cryptographic operation through a typed algorithm layer (RFC 7518), so
//! that an operation never runs with an algorithm that does not fit the
//! key's type, size or declared `alg`.
//!
//! # Quick Start
//!
//! ```rust
//! use jwkit::{Jwk, JwkParams, SymmetricJwk};
//!
//! // A 256-bit HMAC key, declared for HS256
//! let jwk = SymmetricJwk::generate_for_alg("HS256", JwkParams::new())?;
//!
//! // The declared alg is used when none is requested
//! let signature = jwk.sign(b"payload", None)?;
//! assert!(jwk.verify(b"payload", &signature, None, None)?);
//!
//! // Requesting a different alg is a conflict, never a silent override
//! assert!(jwk.sign(b"payload", Some("HS512")).is_err());
//! # Ok::<(), jwkit::JwkError>(())
//! ```
//!
//! # Key Types
//!
//! | kty | Type | Operations |
//! |-----|------|------------|
//! | `oct` | [`SymmetricJwk`] | HMAC, AES-GCM, AES-CBC-HMAC, AES key wrap |
//! | `OKP` | `OkpJwk` | key material only; `EdDSA` through `OkpJwk::eddsa` |
//!
//! # Algorithm Selection
//!
//! Each operation takes an optional `alg`. It is resolved against the key's
//! own registry for that operation:
//!
//! - the key declares an `alg` and another one is requested: error
//! - the resolved name is not in the registry: error
//! - neither is given: error (or, for `verify`, an allow-list of
//!   candidates may be supplied)
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! jwkit = "0.1"                                                   # oct + OKP (default)
//! jwkit = { version = "0.1", default-features = false }           # oct only
//! jwkit = { version = "0.1", features = ["prelude"] }             # with prelude
//! ```
//!
//! # Security
//!
//! - Key material is zeroized on drop
//! - Debug output redacts private parameters
//! - Constant-time comparison for MACs, tags and secret keys
//! - No unsafe code
//!
//! # Logging
//!
//! Algorithm selection and key operations emit `tracing` events at the
//! `debug` level. Key material, plaintexts and tags are never logged.
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Ergonomic imports (requires `prelude` feature)

#![forbid(unsafe_code)]

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use core::error::{JwkError, JwkResult};
pub use core::jwk::{EncryptOutput, Jwk, SymmetricJwk};
pub use core::params::{JwkParameter, JwkParams, ParamKind};

#[cfg(feature = "okp")]
pub use core::jwk::{OkpCurve, OkpJwk};
