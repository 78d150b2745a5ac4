//! Ergonomic imports for working with JWKs.
//!
//! # Usage
//!
//! ```rust
//! use jwkit::prelude::*;
//!
//! let kek = SymmetricJwk::generate_for_alg("A128GCM", JwkParams::new())?;
//! assert_eq!(kek.alg(), Some(A128Gcm::NAME));
//! # Ok::<(), JwkError>(())
//! ```

pub use crate::core::error::{JwkError, JwkResult};
pub use crate::core::jwa::{
    A128CbcHs256, A128Gcm, A128GcmKw, A128Kw, A192CbcHs384, A192Gcm, A192GcmKw, A192Kw,
    A256CbcHs512, A256Gcm, A256GcmKw, A256Kw, AesAlg, Alg, AsymmetricAlg, AsymmetricKey,
    DirectKeyUse, Hs256, Hs384, Hs512, KeyManagementAlg, KeyWrapAlg, SignatureAlg,
    SymmetricAlg,
};
pub use crate::core::jwk::{EncryptOutput, Jwk, SymmetricJwk};
pub use crate::core::params::{JwkParameter, JwkParams, ParamKind};

#[cfg(feature = "okp")]
pub use crate::core::jwa::EdDsa;
#[cfg(feature = "okp")]
pub use crate::core::jwk::{OkpCurve, OkpJwk};
