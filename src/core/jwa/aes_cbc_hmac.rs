//! AES-CBC with HMAC-SHA2 content encryption (RFC 7518 §5.2).
//!
//! The key is the concatenation of a MAC key and an encryption key of equal
//! length. The tag is the HMAC of `aad || iv || ciphertext || al`, where
//! `al` is the bit length of `aad` as a 64-bit big-endian integer, truncated
//! to half the digest output.

use core::fmt::{self, Debug};
use core::marker::PhantomData;

use ::aes::cipher::block_padding::Pkcs7;
use ::aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use ::aes::{Aes128, Aes192, Aes256};
use ::hmac::digest::crypto_common::BlockSizeUser;
use ::hmac::digest::typenum::Unsigned;
use ::hmac::digest::{Digest, OutputSizeUser};
use ::hmac::{Mac, SimpleHmac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{check_exact_size, check_iv, AesAlg, AesCipher, Alg, SymmetricAlg};

/// Size of the CBC initialization vector in bytes.
const CBC_IV_SIZE: usize = 16;

/// AES-CBC encryption authenticated with a truncated HMAC.
#[derive(Clone)]
pub struct CbcHmac<C, D> {
    key: Zeroizing<Vec<u8>>,
    _engine: PhantomData<fn() -> (C, D)>,
}

/// `A128CBC-HS256`: AES-128-CBC with HMAC-SHA-256.
pub type A128CbcHs256 = CbcHmac<Aes128, Sha256>;
/// `A192CBC-HS384`: AES-192-CBC with HMAC-SHA-384.
pub type A192CbcHs384 = CbcHmac<Aes192, Sha384>;
/// `A256CBC-HS512`: AES-256-CBC with HMAC-SHA-512.
pub type A256CbcHs512 = CbcHmac<Aes256, Sha512>;

impl Alg for A128CbcHs256 {
    const NAME: &'static str = "A128CBC-HS256";
    const DESCRIPTION: &'static str = "AES_128_CBC_HMAC_SHA_256 authenticated encryption algorithm";
}

impl Alg for A192CbcHs384 {
    const NAME: &'static str = "A192CBC-HS384";
    const DESCRIPTION: &'static str = "AES_192_CBC_HMAC_SHA_384 authenticated encryption algorithm";
}

impl Alg for A256CbcHs512 {
    const NAME: &'static str = "A256CBC-HS512";
    const DESCRIPTION: &'static str = "AES_256_CBC_HMAC_SHA_512 authenticated encryption algorithm";
}

impl<C, D> CbcHmac<C, D>
where
    C: AesCipher,
    D: Digest + BlockSizeUser,
{
    const HALF: usize = C::BITS / 8;

    fn mac_key(&self) -> &[u8] {
        &self.key[..Self::HALF]
    }

    fn enc_key(&self) -> &[u8] {
        &self.key[Self::HALF..]
    }

    /// Computes the truncated authentication tag.
    fn tag(&self, iv: &[u8], ciphertext: &[u8], aad: &[u8]) -> JwkResult<Vec<u8>> {
        let al = u64::try_from(aad.len())
            .ok()
            .and_then(|len| len.checked_mul(8))
            .ok_or(JwkError::CryptoError)?;
        let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(self.mac_key())
            .map_err(|_| JwkError::CryptoError)?;
        mac.update(aad);
        mac.update(iv);
        mac.update(ciphertext);
        mac.update(&al.to_be_bytes());
        let mut tag = mac.finalize().into_bytes().to_vec();
        tag.truncate(<D as OutputSizeUser>::OutputSize::USIZE / 2);
        Ok(tag)
    }
}

impl<C, D> SymmetricAlg for CbcHmac<C, D>
where
    C: AesCipher,
    D: Digest + BlockSizeUser,
    Self: Alg,
{
    fn check_key(key: &[u8]) -> JwkResult<()> {
        check_exact_size(Self::NAME, key, 2 * C::BITS)
    }

    fn new(key: &[u8]) -> JwkResult<Self> {
        Self::check_key(key)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            _engine: PhantomData,
        })
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl<C, D> AesAlg for CbcHmac<C, D>
where
    C: AesCipher + BlockEncryptMut + BlockDecryptMut,
    D: Digest + BlockSizeUser,
    Self: Alg,
{
    const KEY_SIZE: usize = 2 * C::BITS;
    const TAG_SIZE: usize = <D as OutputSizeUser>::OutputSize::USIZE / 2;
    const IV_SIZE: usize = CBC_IV_SIZE;

    fn encrypt(&self, iv: &[u8], plaintext: &[u8], aad: Option<&[u8]>) -> JwkResult<Vec<u8>> {
        check_iv(iv, CBC_IV_SIZE)?;
        let aad = aad.unwrap_or_default();
        let encryptor = cbc::Encryptor::<C>::new_from_slices(self.enc_key(), iv)
            .map_err(|_| JwkError::CryptoError)?;
        let mut output = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext);
        let tag = self.tag(iv, &output, aad)?;
        output.extend_from_slice(&tag);
        Ok(output)
    }

    fn decrypt(
        &self,
        iv: &[u8],
        ciphertext_with_tag: &[u8],
        aad: Option<&[u8]>,
    ) -> JwkResult<Vec<u8>> {
        check_iv(iv, CBC_IV_SIZE)?;
        let aad = aad.unwrap_or_default();
        let split = ciphertext_with_tag
            .len()
            .checked_sub(Self::TAG_SIZE)
            .ok_or(JwkError::AuthenticationFailed)?;
        let (ciphertext, tag) = ciphertext_with_tag.split_at(split);

        let expected = self.tag(iv, ciphertext, aad)?;
        if !bool::from(expected.ct_eq(tag)) {
            return Err(JwkError::AuthenticationFailed);
        }

        let decryptor = cbc::Decryptor::<C>::new_from_slices(self.enc_key(), iv)
            .map_err(|_| JwkError::CryptoError)?;
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| JwkError::AuthenticationFailed)
    }
}

impl<C, D> Debug for CbcHmac<C, D>
where
    Self: Alg,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CbcHmac")
            .field("alg", &Self::NAME)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
