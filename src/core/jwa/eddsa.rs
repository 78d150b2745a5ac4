//! `EdDSA` signatures over Ed25519 (RFC 8032, RFC 8037).

use core::fmt::{self, Debug};

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{Alg, AsymmetricAlg, AsymmetricKey, SignatureAlg};

/// `EdDSA` with an Ed25519 key.
///
/// Signing needs the private key and verification the public key; an
/// instance holds exactly one of them.
pub struct EdDsa {
    key: AsymmetricKey<SigningKey, VerifyingKey>,
}

impl Alg for EdDsa {
    const NAME: &'static str = "EdDSA";
    const DESCRIPTION: &'static str = "EdDSA signature algorithms";
}

impl AsymmetricAlg for EdDsa {
    type PrivateKey = SigningKey;
    type PublicKey = VerifyingKey;

    fn check_key(key: &AsymmetricKey<SigningKey, VerifyingKey>) -> JwkResult<()> {
        match key {
            // A signing key always derives a valid public point.
            AsymmetricKey::Private(_) => Ok(()),
            AsymmetricKey::Public(public) if public.is_weak() => Err(JwkError::InvalidKey),
            AsymmetricKey::Public(_) => Ok(()),
        }
    }

    fn new(key: AsymmetricKey<SigningKey, VerifyingKey>) -> JwkResult<Self> {
        Self::check_key(&key)?;
        Ok(Self { key })
    }

    fn key(&self) -> &AsymmetricKey<SigningKey, VerifyingKey> {
        &self.key
    }
}

impl SignatureAlg for EdDsa {
    fn sign(&self, data: &[u8]) -> JwkResult<Vec<u8>> {
        let signing_key = self.private_key_required()?;
        let signature = signing_key
            .try_sign(data)
            .map_err(|_| JwkError::CryptoError)?;
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> JwkResult<bool> {
        let verifying_key = self.public_key_required()?;
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(verifying_key.verify_strict(data, &signature).is_ok())
    }
}

impl Debug for EdDsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.key.is_private() {
            "private"
        } else {
            "public"
        };
        f.debug_struct("EdDsa").field("key", &kind).finish()
    }
}
