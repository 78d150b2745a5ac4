//! HMAC with SHA-2 signature algorithms (`HS256`, `HS384`, `HS512`).

use core::fmt::{self, Debug};
use core::marker::PhantomData;

use ::hmac::digest::crypto_common::BlockSizeUser;
use ::hmac::digest::typenum::Unsigned;
use ::hmac::digest::{Digest, OutputSizeUser};
use ::hmac::{Mac, SimpleHmac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{Alg, SignatureAlg, SymmetricAlg};

/// HMAC keyed with raw bytes, generic over the SHA-2 digest.
///
/// Keys shorter than the digest output are rejected (RFC 7518 §3.2).
#[derive(Clone)]
pub struct HmacSha<D> {
    key: Zeroizing<Vec<u8>>,
    _digest: PhantomData<fn() -> D>,
}

/// `HS256`: HMAC using SHA-256.
pub type Hs256 = HmacSha<Sha256>;
/// `HS384`: HMAC using SHA-384.
pub type Hs384 = HmacSha<Sha384>;
/// `HS512`: HMAC using SHA-512.
pub type Hs512 = HmacSha<Sha512>;

impl Alg for Hs256 {
    const NAME: &'static str = "HS256";
    const DESCRIPTION: &'static str = "HMAC using SHA-256";
}

impl Alg for Hs384 {
    const NAME: &'static str = "HS384";
    const DESCRIPTION: &'static str = "HMAC using SHA-384";
}

impl Alg for Hs512 {
    const NAME: &'static str = "HS512";
    const DESCRIPTION: &'static str = "HMAC using SHA-512";
}

/// HMAC signature algorithms, with their minimum key size.
pub trait HmacAlg: SymmetricAlg + SignatureAlg {
    /// Minimum key size in bits (the digest output size).
    const MIN_KEY_SIZE: usize;
}

impl<D> HmacAlg for HmacSha<D>
where
    D: Digest + BlockSizeUser,
    Self: Alg,
{
    const MIN_KEY_SIZE: usize = <D as OutputSizeUser>::OutputSize::USIZE * 8;
}

/// Computes the MAC of `data` under `key`.
fn mac<D: Digest + BlockSizeUser>(key: &[u8], data: &[u8]) -> JwkResult<Vec<u8>> {
    let mut mac =
        <SimpleHmac<D> as Mac>::new_from_slice(key).map_err(|_| JwkError::CryptoError)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl<D> SymmetricAlg for HmacSha<D>
where
    D: Digest + BlockSizeUser,
    Self: Alg,
{
    fn check_key(key: &[u8]) -> JwkResult<()> {
        let actual = key.len() * 8;
        if actual < Self::MIN_KEY_SIZE {
            return Err(JwkError::KeyTooShort {
                alg: Self::NAME,
                minimum: Self::MIN_KEY_SIZE,
                actual,
            });
        }
        Ok(())
    }

    fn new(key: &[u8]) -> JwkResult<Self> {
        Self::check_key(key)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            _digest: PhantomData,
        })
    }

    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl<D> SignatureAlg for HmacSha<D>
where
    D: Digest + BlockSizeUser,
    Self: Alg,
{
    fn sign(&self, data: &[u8]) -> JwkResult<Vec<u8>> {
        mac::<D>(&self.key, data)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> JwkResult<bool> {
        let expected = mac::<D>(&self.key, data)?;
        Ok(expected.ct_eq(signature).into())
    }
}

impl<D> Debug for HmacSha<D>
where
    Self: Alg,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSha")
            .field("alg", &Self::NAME)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
