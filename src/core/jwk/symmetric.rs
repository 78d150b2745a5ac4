//! `SymmetricJwk` - symmetric keys (`kty = "oct"`).
//!
//! The raw secret lives base64url encoded in the `k` parameter and is
//! decoded on demand into a zeroizing buffer.
//!
//! # Example
//!
//! ```rust
//! use jwkit::{Jwk, SymmetricJwk};
//!
//! let jwk = SymmetricJwk::generate_for_alg("A256GCM", Default::default())?;
//! assert_eq!(jwk.key_size(), 256);
//!
//! let encrypted = jwk.encrypt(b"hello", Some(&b"context"[..]), None, None)?;
//! let plaintext = jwk.decrypt(
//!     &encrypted.ciphertext,
//!     &encrypted.tag,
//!     &encrypted.iv,
//!     Some(&b"context"[..]),
//!     None,
//! )?;
//! assert_eq!(plaintext, b"hello");
//! # Ok::<(), jwkit::JwkError>(())
//! ```

use core::fmt::{self, Debug};

use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{
    A128CbcHs256, A128Gcm, A128GcmKw, A128Kw, A192CbcHs384, A192Gcm, A192GcmKw, A192Kw,
    A256CbcHs512, A256Gcm, A256GcmKw, A256Kw, DirectKeyUse, Hs256, Hs384, Hs512,
};
use crate::core::jwk::{debug_params, EncryptOutput, Jwk};
use crate::core::params::{encode_b64u, JwkParameter, JwkParams, ParamKind, ALG, KTY};
use crate::core::random::random_bytes;
use crate::core::registry::{
    EncryptionAlgorithm, KeyManagementAlgorithm, Registry, SignatureAlgorithm,
};
use crate::core::selection::{select_alg, select_algs};

const K: &str = "k";

const SIGNATURE_TABLE: &[SignatureAlgorithm] = &[
    SignatureAlgorithm::hmac::<Hs256>(),
    SignatureAlgorithm::hmac::<Hs384>(),
    SignatureAlgorithm::hmac::<Hs512>(),
];

const ENCRYPTION_TABLE: &[EncryptionAlgorithm] = &[
    EncryptionAlgorithm::of::<A128CbcHs256>(),
    EncryptionAlgorithm::of::<A192CbcHs384>(),
    EncryptionAlgorithm::of::<A256CbcHs512>(),
    EncryptionAlgorithm::of::<A128Gcm>(),
    EncryptionAlgorithm::of::<A192Gcm>(),
    EncryptionAlgorithm::of::<A256Gcm>(),
];

const KEY_MANAGEMENT_TABLE: &[KeyManagementAlgorithm] = &[
    KeyManagementAlgorithm::key_wrap::<A128Kw>(),
    KeyManagementAlgorithm::key_wrap::<A192Kw>(),
    KeyManagementAlgorithm::key_wrap::<A256Kw>(),
    KeyManagementAlgorithm::other::<A128GcmKw>(),
    KeyManagementAlgorithm::other::<A192GcmKw>(),
    KeyManagementAlgorithm::other::<A256GcmKw>(),
    KeyManagementAlgorithm::other::<DirectKeyUse>(),
];

/// A symmetric JSON Web Key.
///
/// # Security
///
/// - Parameter values are zeroized on drop
/// - Debug output redacts `k`
/// - Equality compares the raw keys in constant time
#[derive(Clone)]
pub struct SymmetricJwk {
    params: JwkParams,
}

impl SymmetricJwk {
    /// Builds a key from raw secret bytes and additional parameters.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::InvalidParameter` if `k` is empty, or
    /// `JwkError::KtyMismatch` if `params` declare another key type.
    pub fn from_bytes(k: &[u8], mut params: JwkParams) -> JwkResult<Self> {
        if !params.contains(KTY) {
            params.insert(KTY, Self::KTY);
        }
        if let Some(mut previous) = params.insert(K, encode_b64u(k)) {
            previous.zeroize();
        }
        Self::from_params(params)
    }

    /// Generates a random key of `size` bits.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::InvalidParameter` if `size` is not a positive
    /// multiple of 8.
    pub fn generate(size: usize, params: JwkParams) -> JwkResult<Self> {
        if size == 0 || size % 8 != 0 {
            return Err(JwkError::InvalidParameter("size"));
        }
        let key = random_bytes(size / 8)?;
        debug!(size, "generated symmetric key");
        Self::from_bytes(&key, params)
    }

    /// Generates a random key suitable for `alg`, recording `alg` in the key.
    ///
    /// Signature algorithms get their minimum key size, encryption
    /// algorithms their exact key size.
    ///
    /// # Errors
    ///
    /// - `JwkError::UnsupportedAlgorithm` if `alg` is neither a signature
    ///   nor an encryption algorithm of this key type
    /// - `JwkError::AlgorithmConflict` if `params` declare another `alg`
    pub fn generate_for_alg(alg: &str, params: JwkParams) -> JwkResult<Self> {
        let size = if let Some(sigalg) = Self::SIGNATURE_ALGORITHMS.get(alg) {
            sigalg.min_key_size
        } else if let Some(encalg) = Self::ENCRYPTION_ALGORITHMS.get(alg) {
            encalg.key_size
        } else {
            return Err(JwkError::UnsupportedAlgorithm(alg.to_string()));
        };
        if let Some(declared) = params.get(ALG) {
            if declared != alg {
                return Err(JwkError::AlgorithmConflict {
                    requested: alg.to_string(),
                    declared: declared.to_string(),
                });
            }
        }
        Self::generate(size, params.with(ALG, alg))
    }

    /// Returns the raw secret key.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::Base64Decode` if `k` is not valid base64url,
    /// which cannot happen for a key built through this crate.
    pub fn key(&self) -> JwkResult<Zeroizing<Vec<u8>>> {
        self.params.require_b64u(K)
    }

    /// The key size in bits.
    #[must_use]
    pub fn key_size(&self) -> usize {
        let encoded_len = self.params.get(K).map_or(0, str::len);
        encoded_len * 3 / 4 * 8
    }

    /// Wraps `plainkey` with an AES key wrap algorithm.
    ///
    /// # Errors
    ///
    /// - selection errors from the key management registry
    /// - `JwkError::UnsupportedOperation` if the selected algorithm does not
    ///   wrap keys (`dir`, GCM key wrap)
    /// - a key suitability error if this key does not fit the algorithm
    pub fn wrap_key(&self, plainkey: &[u8], alg: Option<&str>) -> JwkResult<Vec<u8>> {
        let keyalg = select_alg(self.alg(), alg, &Self::KEY_MANAGEMENT_ALGORITHMS)?;
        let wrapper = keyalg.wrapper().ok_or(JwkError::UnsupportedOperation {
            operation: "wrap_key",
            target: keyalg.name,
        })?;
        debug!(alg = keyalg.name, "wrapping key");
        wrapper.wrap(&self.key()?, plainkey)
    }

    /// Unwraps `cipherkey`, returning the unwrapped key as a new JWK.
    ///
    /// # Errors
    ///
    /// The errors of [`wrap_key`](Self::wrap_key), and
    /// `JwkError::AuthenticationFailed` if the integrity check fails.
    pub fn unwrap_key(&self, cipherkey: &[u8], alg: Option<&str>) -> JwkResult<Self> {
        let keyalg = select_alg(self.alg(), alg, &Self::KEY_MANAGEMENT_ALGORITHMS)?;
        let wrapper = keyalg.wrapper().ok_or(JwkError::UnsupportedOperation {
            operation: "unwrap_key",
            target: keyalg.name,
        })?;
        debug!(alg = keyalg.name, "unwrapping key");
        let plainkey = Zeroizing::new(wrapper.unwrap(&self.key()?, cipherkey).map_err(|err| {
            debug!(alg = keyalg.name, "key unwrap failed");
            err
        })?);
        Self::from_bytes(&plainkey, JwkParams::new())
    }

    /// Names of the signature algorithms this key can be used with.
    #[must_use]
    pub fn supported_signature_algorithms(&self) -> Vec<&'static str> {
        self.supported(Self::SIGNATURE_ALGORITHMS.iter().map(|a| (a.name, a.supports_key)))
    }

    /// Names of the encryption algorithms this key can be used with.
    #[must_use]
    pub fn supported_encryption_algorithms(&self) -> Vec<&'static str> {
        self.supported(Self::ENCRYPTION_ALGORITHMS.iter().map(|a| (a.name, a.supports_key)))
    }

    /// Names of the key management algorithms this key can be used with.
    #[must_use]
    pub fn supported_key_management_algorithms(&self) -> Vec<&'static str> {
        self.supported(
            Self::KEY_MANAGEMENT_ALGORITHMS
                .iter()
                .map(|a| (a.name, a.supports_key)),
        )
    }

    fn supported(
        &self,
        algs: impl Iterator<Item = (&'static str, fn(&[u8]) -> bool)>,
    ) -> Vec<&'static str> {
        let Ok(key) = self.key() else {
            return Vec::new();
        };
        algs.filter(|(_, supports_key)| supports_key(key.as_slice()))
            .map(|(name, _)| name)
            .collect()
    }
}

impl Jwk for SymmetricJwk {
    const KTY: &'static str = "oct";

    const PARAMS: &'static [JwkParameter] = &[JwkParameter::new(
        K,
        "Key Value",
        true,
        true,
        ParamKind::B64u,
    )];

    const SIGNATURE_ALGORITHMS: Registry<SignatureAlgorithm> = Registry::new(SIGNATURE_TABLE);
    const ENCRYPTION_ALGORITHMS: Registry<EncryptionAlgorithm> = Registry::new(ENCRYPTION_TABLE);
    const KEY_MANAGEMENT_ALGORITHMS: Registry<KeyManagementAlgorithm> =
        Registry::new(KEY_MANAGEMENT_TABLE);

    fn from_params(params: JwkParams) -> JwkResult<Self> {
        params.validate(Self::KTY, Self::PARAMS)?;
        if params.get(K).is_some_and(str::is_empty) {
            return Err(JwkError::InvalidParameter(K));
        }
        Ok(Self { params })
    }

    fn params(&self) -> &JwkParams {
        &self.params
    }

    fn public_jwk(&self) -> JwkResult<Self> {
        Err(JwkError::UnsupportedOperation {
            operation: "public_jwk",
            target: Self::KTY,
        })
    }

    fn sign(&self, data: &[u8], alg: Option<&str>) -> JwkResult<Vec<u8>> {
        let sigalg = select_alg(self.alg(), alg, &Self::SIGNATURE_ALGORITHMS)?;
        debug!(alg = sigalg.name, key_size = self.key_size(), "signing");
        sigalg.sign(&self.key()?, data)
    }

    fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        alg: Option<&str>,
        algs: Option<&[&str]>,
    ) -> JwkResult<bool> {
        let candidates = select_algs(self.alg(), alg, algs, &Self::SIGNATURE_ALGORITHMS)?;
        let key = self.key()?;
        let (usable, unusable): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition::<Vec<&SignatureAlgorithm>, _>(|sigalg| (sigalg.supports_key)(key.as_slice()));
        if usable.is_empty() {
            if let Some(sigalg) = unusable.first() {
                sigalg.check_key(&key)?;
            }
            return Err(JwkError::InvalidKey);
        }
        let mut matched = false;
        for sigalg in usable {
            matched |= sigalg.verify(&key, data, signature)?;
        }
        debug!(matched, skipped = unusable.len(), "verified signature");
        Ok(matched)
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        aad: Option<&[u8]>,
        alg: Option<&str>,
        iv: Option<&[u8]>,
    ) -> JwkResult<EncryptOutput> {
        let encalg = select_alg(self.alg(), alg, &Self::ENCRYPTION_ALGORITHMS)?;
        let iv = match iv {
            Some(iv) => iv.to_vec(),
            None => random_bytes(encalg.iv_size)?.to_vec(),
        };
        debug!(alg = encalg.name, key_size = self.key_size(), "encrypting");

        let mut ciphertext = encalg.encrypt(&self.key()?, &iv, plaintext, aad)?;
        let split = ciphertext
            .len()
            .checked_sub(encalg.tag_size)
            .ok_or(JwkError::CryptoError)?;
        let tag = ciphertext.split_off(split);
        Ok(EncryptOutput {
            ciphertext,
            tag,
            iv,
        })
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        tag: &[u8],
        iv: &[u8],
        aad: Option<&[u8]>,
        alg: Option<&str>,
    ) -> JwkResult<Vec<u8>> {
        let encalg = select_alg(self.alg(), alg, &Self::ENCRYPTION_ALGORITHMS)?;
        let key_size = self.key_size();
        if key_size != encalg.key_size {
            return Err(JwkError::KeySizeMismatch {
                alg: encalg.name,
                expected: encalg.key_size,
                actual: key_size,
            });
        }
        debug!(alg = encalg.name, key_size, "decrypting");

        let mut ciphertext_with_tag = Vec::with_capacity(ciphertext.len() + tag.len());
        ciphertext_with_tag.extend_from_slice(ciphertext);
        ciphertext_with_tag.extend_from_slice(tag);
        encalg
            .decrypt(&self.key()?, iv, &ciphertext_with_tag, aad)
            .map_err(|err| {
                debug!(alg = encalg.name, "decryption failed");
                err
            })
    }
}

// =============================================================================
// PartialEq (constant-time comparison)
// =============================================================================

impl PartialEq for SymmetricJwk {
    fn eq(&self, other: &Self) -> bool {
        match (self.key(), other.key()) {
            (Ok(a), Ok(b)) => a.ct_eq(&b).into(),
            _ => false,
        }
    }
}

impl Eq for SymmetricJwk {}

// =============================================================================
// Debug (security: don't expose key material)
// =============================================================================

impl Debug for SymmetricJwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_params("SymmetricJwk", self, f)
    }
}
