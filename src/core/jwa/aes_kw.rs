//! Key management algorithms for symmetric keys.
//!
//! - `A128KW`, `A192KW`, `A256KW`: AES Key Wrap (RFC 3394)
//! - `A128GCMKW`, `A192GCMKW`, `A256GCMKW`: key wrapping with AES-GCM, where
//!   the IV and tag travel in the JWE header
//! - `dir`: the key is used directly as the content encryption key

use core::fmt::{self, Debug};
use core::marker::PhantomData;

use ::aes::{Aes128, Aes192, Aes256};
use ::aes_kw::Kek;
use zeroize::Zeroizing;

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::aes_gcm::{gcm_decrypt, gcm_encrypt, GCM_IV_SIZE, GCM_TAG_SIZE};
use crate::core::jwa::{
    check_exact_size, AesCipher, Alg, KeyManagementAlg, KeyWrapAlg, SymmetricAlg,
};

/// AES Key Wrap, generic over the AES key size.
#[derive(Clone)]
pub struct KeyWrap<C> {
    key: Zeroizing<Vec<u8>>,
    _cipher: PhantomData<fn() -> C>,
}

/// `A128KW`: AES Key Wrap using a 128-bit key.
pub type A128Kw = KeyWrap<Aes128>;
/// `A192KW`: AES Key Wrap using a 192-bit key.
pub type A192Kw = KeyWrap<Aes192>;
/// `A256KW`: AES Key Wrap using a 256-bit key.
pub type A256Kw = KeyWrap<Aes256>;

impl Alg for A128Kw {
    const NAME: &'static str = "A128KW";
    const DESCRIPTION: &'static str = "AES Key Wrap with default initial value using 128-bit key";
}

impl Alg for A192Kw {
    const NAME: &'static str = "A192KW";
    const DESCRIPTION: &'static str = "AES Key Wrap with default initial value using 192-bit key";
}

impl Alg for A256Kw {
    const NAME: &'static str = "A256KW";
    const DESCRIPTION: &'static str = "AES Key Wrap with default initial value using 256-bit key";
}

impl<C> KeyWrap<C>
where
    C: AesCipher,
{
    fn kek(&self) -> JwkResult<Kek<C>> {
        Kek::<C>::try_from(self.key.as_slice()).map_err(|_| JwkError::CryptoError)
    }
}

impl<C> SymmetricAlg for KeyWrap<C>
where
    C: AesCipher,
    Self: Alg,
{
    fn check_key(key: &[u8]) -> JwkResult<()> {
        check_exact_size(Self::NAME, key, C::BITS)
    }

    fn new(key: &[u8]) -> JwkResult<Self> {
        Self::check_key(key)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            _cipher: PhantomData,
        })
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl<C> KeyManagementAlg for KeyWrap<C> where Self: Alg {}

impl<C> KeyWrapAlg for KeyWrap<C>
where
    C: AesCipher,
    Self: Alg,
{
    /// Wraps `plainkey`, which must be a multiple of 8 bytes and at least
    /// 16 bytes long.
    fn wrap_key(&self, plainkey: &[u8]) -> JwkResult<Vec<u8>> {
        if plainkey.len() < 16 || plainkey.len() % 8 != 0 {
            return Err(JwkError::InvalidKey);
        }
        self.kek()?
            .wrap_vec(plainkey)
            .map_err(|_| JwkError::CryptoError)
    }

    fn unwrap_key(&self, cipherkey: &[u8]) -> JwkResult<Vec<u8>> {
        if cipherkey.len() < 24 || cipherkey.len() % 8 != 0 {
            return Err(JwkError::AuthenticationFailed);
        }
        self.kek()?
            .unwrap_vec(cipherkey)
            .map_err(|_| JwkError::AuthenticationFailed)
    }
}

impl<C> Debug for KeyWrap<C>
where
    Self: Alg,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyWrap")
            .field("alg", &Self::NAME)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Key wrapping with AES-GCM, generic over the AES key size.
///
/// Unlike [`KeyWrap`], wrapping needs an IV and produces a separate tag,
/// so the operations are inherent methods rather than [`KeyWrapAlg`].
#[derive(Clone)]
pub struct GcmKeyWrap<C> {
    key: Zeroizing<Vec<u8>>,
    _cipher: PhantomData<fn() -> C>,
}

/// `A128GCMKW`: key wrapping with AES GCM using a 128-bit key.
pub type A128GcmKw = GcmKeyWrap<Aes128>;
/// `A192GCMKW`: key wrapping with AES GCM using a 192-bit key.
pub type A192GcmKw = GcmKeyWrap<Aes192>;
/// `A256GCMKW`: key wrapping with AES GCM using a 256-bit key.
pub type A256GcmKw = GcmKeyWrap<Aes256>;

impl Alg for A128GcmKw {
    const NAME: &'static str = "A128GCMKW";
    const DESCRIPTION: &'static str = "Key wrapping with AES GCM using 128-bit key";
}

impl Alg for A192GcmKw {
    const NAME: &'static str = "A192GCMKW";
    const DESCRIPTION: &'static str = "Key wrapping with AES GCM using 192-bit key";
}

impl Alg for A256GcmKw {
    const NAME: &'static str = "A256GCMKW";
    const DESCRIPTION: &'static str = "Key wrapping with AES GCM using 256-bit key";
}

impl<C> GcmKeyWrap<C>
where
    C: AesCipher,
{
    /// IV size in bytes.
    pub const IV_SIZE: usize = GCM_IV_SIZE;
    /// Tag size in bytes.
    pub const TAG_SIZE: usize = GCM_TAG_SIZE;

    /// Wraps `plainkey` under `iv`, returning the wrapped key and the tag.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::InvalidIv` if `iv` is not 12 bytes long.
    pub fn wrap_key(&self, plainkey: &[u8], iv: &[u8]) -> JwkResult<(Vec<u8>, Vec<u8>)> {
        let mut cipherkey = gcm_encrypt::<C>(&self.key, iv, plainkey, &[])?;
        let tag = cipherkey.split_off(cipherkey.len() - GCM_TAG_SIZE);
        Ok((cipherkey, tag))
    }

    /// Unwraps `cipherkey` using the `tag` and `iv` produced by
    /// [`wrap_key`](Self::wrap_key).
    ///
    /// # Errors
    ///
    /// Returns `JwkError::AuthenticationFailed` if the tag does not verify.
    pub fn unwrap_key(&self, cipherkey: &[u8], tag: &[u8], iv: &[u8]) -> JwkResult<Vec<u8>> {
        if tag.len() != GCM_TAG_SIZE {
            return Err(JwkError::AuthenticationFailed);
        }
        let mut input = Vec::with_capacity(cipherkey.len() + tag.len());
        input.extend_from_slice(cipherkey);
        input.extend_from_slice(tag);
        gcm_decrypt::<C>(&self.key, iv, &input, &[])
    }
}

impl<C> SymmetricAlg for GcmKeyWrap<C>
where
    C: AesCipher,
    Self: Alg,
{
    fn check_key(key: &[u8]) -> JwkResult<()> {
        check_exact_size(Self::NAME, key, C::BITS)
    }

    fn new(key: &[u8]) -> JwkResult<Self> {
        Self::check_key(key)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            _cipher: PhantomData,
        })
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl<C> KeyManagementAlg for GcmKeyWrap<C> where Self: Alg {}

impl<C> Debug for GcmKeyWrap<C>
where
    Self: Alg,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcmKeyWrap")
            .field("alg", &Self::NAME)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// `dir`: direct use of a shared symmetric key as the content encryption key.
#[derive(Clone)]
pub struct DirectKeyUse {
    key: Zeroizing<Vec<u8>>,
}

impl Alg for DirectKeyUse {
    const NAME: &'static str = "dir";
    const DESCRIPTION: &'static str = "Direct use of a shared symmetric key as the CEK";
}

impl SymmetricAlg for DirectKeyUse {
    fn check_key(key: &[u8]) -> JwkResult<()> {
        if key.is_empty() {
            return Err(JwkError::InvalidKey);
        }
        Ok(())
    }

    fn new(key: &[u8]) -> JwkResult<Self> {
        Self::check_key(key)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
        })
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl KeyManagementAlg for DirectKeyUse {}

impl Debug for DirectKeyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectKeyUse")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
