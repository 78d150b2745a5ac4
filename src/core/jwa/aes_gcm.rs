//! AES-GCM content encryption (`A128GCM`, `A192GCM`, `A256GCM`).

use core::fmt::{self, Debug};
use core::marker::PhantomData;

use ::aes::{Aes128, Aes192, Aes256};
use ::aes_gcm::aead::consts::U12;
use ::aes_gcm::aead::generic_array::GenericArray;
use ::aes_gcm::aead::{Aead, KeyInit, Payload};
use ::aes_gcm::AesGcm;
use zeroize::Zeroizing;

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{check_exact_size, check_iv, AesAlg, AesCipher, Alg, SymmetricAlg};

/// Size of the GCM authentication tag in bytes.
pub(crate) const GCM_TAG_SIZE: usize = 16;

/// Size of the GCM nonce in bytes.
pub(crate) const GCM_IV_SIZE: usize = 12;

/// AES in Galois/Counter Mode, generic over the AES key size.
#[derive(Clone)]
pub struct Gcm<C> {
    key: Zeroizing<Vec<u8>>,
    _cipher: PhantomData<fn() -> C>,
}

/// `A128GCM`: AES GCM using a 128-bit key.
pub type A128Gcm = Gcm<Aes128>;
/// `A192GCM`: AES GCM using a 192-bit key.
pub type A192Gcm = Gcm<Aes192>;
/// `A256GCM`: AES GCM using a 256-bit key.
pub type A256Gcm = Gcm<Aes256>;

impl Alg for A128Gcm {
    const NAME: &'static str = "A128GCM";
    const DESCRIPTION: &'static str = "AES GCM using 128-bit key";
}

impl Alg for A192Gcm {
    const NAME: &'static str = "A192GCM";
    const DESCRIPTION: &'static str = "AES GCM using 192-bit key";
}

impl Alg for A256Gcm {
    const NAME: &'static str = "A256GCM";
    const DESCRIPTION: &'static str = "AES GCM using 256-bit key";
}

/// Encrypts with AES-GCM, returning `ciphertext || tag`.
///
/// Shared with the GCM key wrapping algorithms.
pub(crate) fn gcm_encrypt<C: AesCipher>(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> JwkResult<Vec<u8>> {
    check_iv(iv, GCM_IV_SIZE)?;
    let cipher =
        AesGcm::<C, U12>::new_from_slice(key).map_err(|_| JwkError::CryptoError)?;
    cipher
        .encrypt(
            GenericArray::from_slice(iv),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| JwkError::CryptoError)
}

/// Decrypts `ciphertext || tag` with AES-GCM.
pub(crate) fn gcm_decrypt<C: AesCipher>(
    key: &[u8],
    iv: &[u8],
    ciphertext_with_tag: &[u8],
    aad: &[u8],
) -> JwkResult<Vec<u8>> {
    check_iv(iv, GCM_IV_SIZE)?;
    if ciphertext_with_tag.len() < GCM_TAG_SIZE {
        return Err(JwkError::AuthenticationFailed);
    }
    let cipher =
        AesGcm::<C, U12>::new_from_slice(key).map_err(|_| JwkError::CryptoError)?;
    cipher
        .decrypt(
            GenericArray::from_slice(iv),
            Payload {
                msg: ciphertext_with_tag,
                aad,
            },
        )
        .map_err(|_| JwkError::AuthenticationFailed)
}

impl<C> SymmetricAlg for Gcm<C>
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

impl<C> AesAlg for Gcm<C>
where
    C: AesCipher,
    Self: Alg,
{
    const KEY_SIZE: usize = C::BITS;
    const TAG_SIZE: usize = GCM_TAG_SIZE;
    const IV_SIZE: usize = GCM_IV_SIZE;

    fn encrypt(&self, iv: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> JwkResult<Vec<u8>> {
        gcm_encrypt::<C>(&self.key, iv, plaintext, aad.unwrap_or_default())
    }

    fn decrypt(
        &self,
        iv: &[u8],
        ciphertext_with_tag: &[u8],
        aad: Option<&[u8]>,
    ) -> JwkResult<Vec<u8>> {
        gcm_decrypt::<C>(&self.key, iv, ciphertext_with_tag, aad.unwrap_or_default())
    }
}

impl<C> Debug for Gcm<C>
where
    Self: Alg,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gcm")
            .field("alg", &Self::NAME)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
