//! JSON Web Algorithms: the capability contracts every algorithm implements.
//!
//! Each concrete algorithm is a distinct type that implements one trait from
//! each axis:
//!
//! - key handling: [`SymmetricAlg`] (raw bytes) or [`AsymmetricAlg`]
//!   (a private *or* a public key, never both)
//! - capability: [`SignatureAlg`], [`AesAlg`] (AEAD) or
//!   [`KeyManagementAlg`] / [`KeyWrapAlg`]
//!
//! Construction always goes through `check_key`, so an instance that exists
//! holds a key that is suitable for it.
//!
//! # Algorithms
//!
//! | Name | Type | Capability |
//! |------|------|------------|
//! | `HS256`, `HS384`, `HS512` | [`Hs256`], [`Hs384`], [`Hs512`] | signature (MAC) |
//! | `A128GCM`, `A192GCM`, `A256GCM` | [`A128Gcm`], [`A192Gcm`], [`A256Gcm`] | AEAD |
//! | `A128CBC-HS256`, `A192CBC-HS384`, `A256CBC-HS512` | [`A128CbcHs256`], [`A192CbcHs384`], [`A256CbcHs512`] | AEAD |
//! | `A128KW`, `A192KW`, `A256KW` | [`A128Kw`], [`A192Kw`], [`A256Kw`] | key wrap |
//! | `A128GCMKW`, `A192GCMKW`, `A256GCMKW` | [`A128GcmKw`], [`A192GcmKw`], [`A256GcmKw`] | key management |
//! | `dir` | [`DirectKeyUse`] | key management |
//! | `EdDSA` | `EdDsa` (feature `okp`) | signature |

mod aes_cbc_hmac;
mod aes_gcm;
mod aes_kw;
#[cfg(feature = "okp")]
mod eddsa;
mod hmac;

pub use self::aes_cbc_hmac::{A128CbcHs256, A192CbcHs384, A256CbcHs512, CbcHmac};
pub use self::aes_gcm::{A128Gcm, A192Gcm, A256Gcm, Gcm};
pub use self::aes_kw::{
    A128GcmKw, A128Kw, A192GcmKw, A192Kw, A256GcmKw, A256Kw, DirectKeyUse, GcmKeyWrap, KeyWrap,
};
#[cfg(feature = "okp")]
pub use self::eddsa::EdDsa;
pub use self::hmac::{Hs256, Hs384, Hs512, HmacAlg, HmacSha};

use ::aes::cipher::consts::U16;
use ::aes::cipher::{BlockCipher, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};

use crate::core::error::{JwkError, JwkResult};

mod private {
    pub trait Sealed {}
}

/// Base trait for all algorithms.
///
/// An algorithm has a name and a description, as listed in the IANA JOSE
/// registry: <https://www.iana.org/assignments/jose/jose.xhtml#web-signature-encryption-algorithms>
pub trait Alg {
    /// The algorithm identifier (e.g., "HS256").
    const NAME: &'static str;

    /// A human readable description.
    const DESCRIPTION: &'static str;

    /// Whether the algorithm may only be used to process existing data.
    const READ_ONLY: bool = false;
}

/// An algorithm keyed with raw bytes.
pub trait SymmetricAlg: Alg + Sized {
    /// Checks that `key` is suitable for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns a key suitability error describing the mismatch.
    fn check_key(key: &[u8]) -> JwkResult<()>;

    /// Returns `true` if `key` is suitable for this algorithm.
    ///
    /// This never fails; it only wraps [`SymmetricAlg::check_key`].
    #[must_use]
    fn supports_key(key: &[u8]) -> bool {
        Self::check_key(key).is_ok()
    }

    /// Creates an instance after validating `key` with `check_key`.
    ///
    /// # Errors
    ///
    /// Returns the `check_key` error if the key is not suitable.
    fn new(key: &[u8]) -> JwkResult<Self>;

    /// Returns the raw key bytes.
    fn key(&self) -> &[u8];
}

/// The key held by an asymmetric algorithm: exactly one private or public key.
#[derive(Clone, Debug)]
pub enum AsymmetricKey<Priv, Pub> {
    /// A private key.
    Private(Priv),
    /// A public key.
    Public(Pub),
}

impl<Priv, Pub> AsymmetricKey<Priv, Pub> {
    /// Returns `true` if this holds a private key.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }
}

/// An algorithm keyed with either a private or a public key.
///
/// The available operations depend on which kind of key is held; the
/// accessors [`private_key_required`](AsymmetricAlg::private_key_required)
/// and [`public_key_required`](AsymmetricAlg::public_key_required) must be
/// used before touching the key.
pub trait AsymmetricAlg: Alg + Sized {
    /// The private key type.
    type PrivateKey;
    /// The public key type.
    type PublicKey;

    /// Checks that `key` is suitable for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns a key suitability error if the key cannot be used.
    fn check_key(key: &AsymmetricKey<Self::PrivateKey, Self::PublicKey>) -> JwkResult<()>;

    /// Returns `true` if `key` is suitable for this algorithm.
    #[must_use]
    fn supports_key(key: &AsymmetricKey<Self::PrivateKey, Self::PublicKey>) -> bool {
        Self::check_key(key).is_ok()
    }

    /// Creates an instance after validating `key` with `check_key`.
    ///
    /// # Errors
    ///
    /// Returns the `check_key` error if the key is not suitable.
    fn new(key: AsymmetricKey<Self::PrivateKey, Self::PublicKey>) -> JwkResult<Self>;

    /// Returns the held key.
    fn key(&self) -> &AsymmetricKey<Self::PrivateKey, Self::PublicKey>;

    /// Returns the private key.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::PrivateKeyRequired` if a public key is held.
    fn private_key_required(&self) -> JwkResult<&Self::PrivateKey> {
        match self.key() {
            AsymmetricKey::Private(key) => Ok(key),
            AsymmetricKey::Public(_) => Err(JwkError::PrivateKeyRequired),
        }
    }

    /// Returns the public key.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::PublicKeyRequired` if a private key is held.
    fn public_key_required(&self) -> JwkResult<&Self::PublicKey> {
        match self.key() {
            AsymmetricKey::Public(key) => Ok(key),
            AsymmetricKey::Private(_) => Err(JwkError::PublicKeyRequired),
        }
    }
}

/// Signature (or MAC) algorithms.
pub trait SignatureAlg: Alg {
    /// Signs arbitrary data and returns the raw signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the held key cannot sign.
    fn sign(&self, data: &[u8]) -> JwkResult<Vec<u8>>;

    /// Verifies a raw signature against arbitrary data.
    ///
    /// A signature that does not match is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the held key cannot verify.
    fn verify(&self, data: &[u8], signature: &[u8]) -> JwkResult<bool>;
}

/// AES based authenticated encryption algorithms.
pub trait AesAlg: SymmetricAlg {
    /// Key size in bits.
    const KEY_SIZE: usize;
    /// Authentication tag size in bytes.
    const TAG_SIZE: usize;
    /// Initialization vector size in bytes.
    const IV_SIZE: usize;

    /// Encrypts `plaintext`, returning the ciphertext followed by the tag.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::InvalidIv` if `iv` is not `IV_SIZE` bytes long.
    fn encrypt(&self, iv: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> JwkResult<Vec<u8>>;

    /// Decrypts `ciphertext_with_tag` (ciphertext followed by the tag).
    ///
    /// # Errors
    ///
    /// Returns `JwkError::AuthenticationFailed` if the tag does not verify.
    fn decrypt(
        &self,
        iv: &[u8],
        ciphertext_with_tag: &[u8],
        aad: Option<&[u8]>,
    ) -> JwkResult<Vec<u8>>;
}

/// Key management algorithms.
pub trait KeyManagementAlg: Alg {}

/// Key management algorithms that wrap a key under another key.
pub trait KeyWrapAlg: KeyManagementAlg {
    /// Wraps `plainkey`.
    ///
    /// # Errors
    ///
    /// Returns an error if `plainkey` has a length the algorithm cannot wrap.
    fn wrap_key(&self, plainkey: &[u8]) -> JwkResult<Vec<u8>>;

    /// Unwraps `cipherkey`.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::AuthenticationFailed` if the integrity check fails.
    fn unwrap_key(&self, cipherkey: &[u8]) -> JwkResult<Vec<u8>>;
}

/// AES block cipher variants usable as the engine of an algorithm.
///
/// This trait is sealed; it is implemented for `aes::Aes128`,
/// `aes::Aes192` and `aes::Aes256`.
pub trait AesCipher:
    private::Sealed
    + KeyInit
    + BlockCipher
    + BlockSizeUser<BlockSize = U16>
    + BlockEncrypt
    + BlockDecrypt
{
    /// The key size of the cipher in bits.
    const BITS: usize;
}

impl private::Sealed for ::aes::Aes128 {}
impl private::Sealed for ::aes::Aes192 {}
impl private::Sealed for ::aes::Aes256 {}

impl AesCipher for ::aes::Aes128 {
    const BITS: usize = 128;
}

impl AesCipher for ::aes::Aes192 {
    const BITS: usize = 192;
}

impl AesCipher for ::aes::Aes256 {
    const BITS: usize = 256;
}

/// Checks that `key` is exactly `expected` bits long.
pub(crate) fn check_exact_size(alg: &'static str, key: &[u8], expected: usize) -> JwkResult<()> {
    let actual = key.len() * 8;
    if actual == expected {
        Ok(())
    } else {
        Err(JwkError::KeySizeMismatch {
            alg,
            expected,
            actual,
        })
    }
}

/// Checks that `iv` is exactly `expected` bytes long.
pub(crate) fn check_iv(iv: &[u8], expected: usize) -> JwkResult<()> {
    if iv.len() == expected {
        Ok(())
    } else {
        Err(JwkError::InvalidIv {
            expected,
            actual: iv.len(),
        })
    }
}
