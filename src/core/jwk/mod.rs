//! JSON Web Keys (RFC 7517).
//!
//! Every key type implements [`Jwk`]: it declares its `kty`, the schema of
//! its parameters and the closed registries of algorithms it can be used
//! with. Operations resolve their algorithm through those registries only.
//!
//! | kty | Type | Feature |
//! |-----|------|---------|
//! | `oct` | [`SymmetricJwk`] | always |
//! | `OKP` | `OkpJwk` | `okp` |

#[cfg(feature = "okp")]
mod okp;
mod symmetric;

use core::fmt;

use base64::prelude::*;
use sha2::{Digest, Sha256};

#[cfg(feature = "okp")]
pub use self::okp::{OkpCurve, OkpJwk};
pub use self::symmetric::SymmetricJwk;

use crate::core::error::JwkResult;
use crate::core::params::{JwkParameter, JwkParams, ALG, KID, KTY, USE};
use crate::core::registry::{
    EncryptionAlgorithm, KeyManagementAlgorithm, Registry, SignatureAlgorithm,
};

/// The result of an authenticated encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptOutput {
    /// The ciphertext, without the tag.
    pub ciphertext: Vec<u8>,
    /// The authentication tag.
    pub tag: Vec<u8>,
    /// The initialization vector that was used.
    pub iv: Vec<u8>,
}

/// A JSON Web Key of a specific key type.
pub trait Jwk: Sized {
    /// The `kty` value of this key type.
    const KTY: &'static str;

    /// The key type specific parameters.
    const PARAMS: &'static [JwkParameter];

    /// Signature algorithms usable with this key type.
    const SIGNATURE_ALGORITHMS: Registry<SignatureAlgorithm>;

    /// Content encryption algorithms usable with this key type.
    const ENCRYPTION_ALGORITHMS: Registry<EncryptionAlgorithm>;

    /// Key management algorithms usable with this key type.
    const KEY_MANAGEMENT_ALGORITHMS: Registry<KeyManagementAlgorithm>;

    /// Builds a key from its parameters.
    ///
    /// # Errors
    ///
    /// - `JwkError::MissingParameter` if `kty` or a required parameter is absent
    /// - `JwkError::KtyMismatch` if `kty` names another key type
    /// - `JwkError::InvalidParameter` if a value is malformed
    fn from_params(params: JwkParams) -> JwkResult<Self>;

    /// Returns the parameters of this key.
    fn params(&self) -> &JwkParams;

    /// The algorithm this key is declared for, if any.
    fn alg(&self) -> Option<&str> {
        self.params().get(ALG)
    }

    /// The key identifier, if any.
    fn kid(&self) -> Option<&str> {
        self.params().get(KID)
    }

    /// The intended use of the key (`sig` or `enc`), if any.
    fn key_use(&self) -> Option<&str> {
        self.params().get(USE)
    }

    /// Returns `true` if this key holds private parameters.
    fn is_private(&self) -> bool {
        Self::PARAMS
            .iter()
            .any(|param| param.is_private && self.params().contains(param.name))
    }

    /// Computes the RFC 7638 thumbprint of this key, using SHA-256.
    ///
    /// Only `kty` and the required parameters take part, so a private key
    /// and its public key have the same thumbprint.
    fn thumbprint(&self) -> String {
        let mut members: Vec<(&str, &str)> = Self::PARAMS
            .iter()
            .filter(|param| param.is_required)
            .filter_map(|param| self.params().get(param.name).map(|value| (param.name, value)))
            .collect();
        members.push((KTY, Self::KTY));
        members.sort_unstable();

        let canonical = members
            .iter()
            .map(|(name, value)| format!(r#""{name}":"{value}""#))
            .collect::<Vec<_>>()
            .join(",");
        let digest = Sha256::digest(format!("{{{canonical}}}").as_bytes());
        BASE64_URL_SAFE_NO_PAD.encode(digest)
    }

    /// Returns the public part of this key.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::UnsupportedOperation` for key types without a
    /// public part.
    fn public_jwk(&self) -> JwkResult<Self>;

    /// Signs `data`, returning the raw signature.
    ///
    /// # Errors
    ///
    /// Returns a selection error, or a key suitability error if the key
    /// cannot be used with the selected algorithm.
    fn sign(&self, data: &[u8], alg: Option<&str>) -> JwkResult<Vec<u8>>;

    /// Verifies a raw signature over `data`.
    ///
    /// `algs` is an allow-list used when neither `alg` nor the key declares
    /// an algorithm. Allow-listed algorithms the key is unsuitable for are
    /// skipped. A signature that does not match is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns a selection error, or a key suitability error when no
    /// candidate algorithm accepts the key.
    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        alg: Option<&str>,
        algs: Option<&[&str]>,
    ) -> JwkResult<bool>;

    /// Encrypts `plaintext` with an authenticated encryption algorithm.
    ///
    /// A random IV is generated when `iv` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a selection error, a key suitability error, or
    /// `JwkError::InvalidIv`.
    fn encrypt(
        &self,
        plaintext: &[u8],
        aad: Option<&[u8]>,
        alg: Option<&str>,
        iv: Option<&[u8]>,
    ) -> JwkResult<EncryptOutput>;

    /// Decrypts and authenticates `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::AuthenticationFailed` if the tag does not verify.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        tag: &[u8],
        iv: &[u8],
        aad: Option<&[u8]>,
        alg: Option<&str>,
    ) -> JwkResult<Vec<u8>>;
}

/// Formats the parameters of a key, hiding private values.
pub(crate) fn debug_params<J: Jwk>(
    name: &str,
    jwk: &J,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let mut debug = f.debug_struct(name);
    for (param, value) in jwk.params().iter() {
        let private = J::PARAMS
            .iter()
            .any(|schema| schema.is_private && schema.name == param);
        if private {
            debug.field(param, &"[REDACTED]");
        } else {
            debug.field(param, &value);
        }
    }
    debug.finish()
}
