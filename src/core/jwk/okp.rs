//! `OkpJwk` - Octet Key Pair keys (`kty = "OKP"`, RFC 8037).
//!
//! OKP keys are the extension point for asymmetric keys. Their registries
//! are empty, so the generic JWK operations are not available; an Ed25519
//! key can still be turned into an [`EdDsa`] algorithm instance with
//! [`OkpJwk::eddsa`].

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use ed25519_dalek::{SigningKey, VerifyingKey};
use subtle::ConstantTimeEq;
use tracing::debug;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{AsymmetricAlg, AsymmetricKey, EdDsa};
use crate::core::jwk::{debug_params, EncryptOutput, Jwk};
use crate::core::params::{encode_b64u, JwkParameter, JwkParams, ParamKind, KTY};
use crate::core::random::random_bytes;
use crate::core::registry::{
    EncryptionAlgorithm, KeyManagementAlgorithm, Registry, SignatureAlgorithm,
};

const CRV: &str = "crv";
const X: &str = "x";
const D: &str = "d";

/// Size in bytes of Ed25519 and X25519 keys.
const KEY_SIZE_25519: usize = 32;

/// Curves of OKP keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OkpCurve {
    /// Ed25519 signature curve.
    Ed25519,
    /// Ed448 signature curve.
    Ed448,
    /// X25519 key agreement curve.
    X25519,
    /// X448 key agreement curve.
    X448,
}

impl OkpCurve {
    /// All known curves.
    pub const ALL: [Self; 4] = [Self::Ed25519, Self::Ed448, Self::X25519, Self::X448];

    /// The `crv` value of this curve.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519",
            Self::Ed448 => "Ed448",
            Self::X25519 => "X25519",
            Self::X448 => "X448",
        }
    }

    /// The size in bytes of both the private and the public key.
    #[must_use]
    pub const fn key_size(self) -> usize {
        match self {
            Self::Ed25519 | Self::X25519 => KEY_SIZE_25519,
            Self::Ed448 => 57,
            Self::X448 => 56,
        }
    }

    /// Returns `true` for signature curves, `false` for key agreement ones.
    #[must_use]
    pub const fn is_signature(self) -> bool {
        matches!(self, Self::Ed25519 | Self::Ed448)
    }

    /// Fails for curves without an available engine.
    fn require_engine(self) -> JwkResult<()> {
        match self {
            Self::Ed25519 | Self::X25519 => Ok(()),
            Self::Ed448 | Self::X448 => Err(JwkError::UnsupportedCurve(self.name().to_string())),
        }
    }

    /// Derives the public key from a private key.
    fn public_from_private(self, d: &[u8; KEY_SIZE_25519]) -> JwkResult<[u8; KEY_SIZE_25519]> {
        match self {
            Self::Ed25519 => Ok(SigningKey::from_bytes(d).verifying_key().to_bytes()),
            Self::X25519 => Ok(PublicKey::from(&StaticSecret::from(*d)).to_bytes()),
            Self::Ed448 | Self::X448 => Err(JwkError::UnsupportedCurve(self.name().to_string())),
        }
    }
}

impl FromStr for OkpCurve {
    type Err = JwkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.name() == name)
            .ok_or_else(|| JwkError::UnsupportedCurve(name.to_string()))
    }
}

impl Display for OkpCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a slice into a 25519 key, or fails with `InvalidParameter(name)`.
fn to_array(bytes: &[u8], name: &'static str) -> JwkResult<Zeroizing<[u8; KEY_SIZE_25519]>> {
    let array: [u8; KEY_SIZE_25519] = bytes
        .try_into()
        .map_err(|_| JwkError::InvalidParameter(name))?;
    Ok(Zeroizing::new(array))
}

/// An Octet Key Pair JSON Web Key.
#[derive(Clone)]
pub struct OkpJwk {
    curve: OkpCurve,
    params: JwkParams,
}

impl OkpJwk {
    /// Builds a public key from the raw public bytes.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::UnsupportedCurve` for curves without an engine,
    /// or `JwkError::InvalidParameter` if `x` is not a valid public key.
    pub fn public(crv: OkpCurve, x: &[u8], params: JwkParams) -> JwkResult<Self> {
        let params = params
            .with(KTY, Self::KTY)
            .with(CRV, crv.name())
            .with(X, encode_b64u(x));
        Self::from_params(params)
    }

    /// Builds a private key from the raw public and private bytes.
    ///
    /// # Errors
    ///
    /// The errors of [`public`](Self::public), and
    /// `JwkError::InvalidParameter` if `d` does not match `x`.
    pub fn private(crv: OkpCurve, x: &[u8], d: &[u8], params: JwkParams) -> JwkResult<Self> {
        let params = params
            .with(KTY, Self::KTY)
            .with(CRV, crv.name())
            .with(X, encode_b64u(x))
            .with(D, encode_b64u(d));
        Self::from_params(params)
    }

    /// Generates a private key on `crv`.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::UnsupportedCurve` for curves without an engine.
    pub fn generate(crv: OkpCurve, params: JwkParams) -> JwkResult<Self> {
        crv.require_engine()?;
        let secret = random_bytes(KEY_SIZE_25519)?;
        let d = to_array(&secret, D)?;
        let x = crv.public_from_private(&d)?;
        debug!(crv = crv.name(), "generated OKP key");
        Self::private(crv, &x, d.as_slice(), params)
    }

    /// The curve of this key.
    #[must_use]
    pub const fn curve(&self) -> OkpCurve {
        self.curve
    }

    /// The raw public key.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::Base64Decode` if `x` is not valid base64url,
    /// which cannot happen for a key built through this crate.
    pub fn public_key(&self) -> JwkResult<Vec<u8>> {
        Ok(self.params.require_b64u(X)?.to_vec())
    }

    /// The raw private key, if this is a private key.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::Base64Decode` if `d` is not valid base64url.
    pub fn private_key(&self) -> JwkResult<Option<Zeroizing<Vec<u8>>>> {
        self.params.decode_b64u(D)
    }

    /// Builds the `EdDSA` algorithm instance for an Ed25519 key.
    ///
    /// The instance holds the private key when `d` is present, the public
    /// key otherwise.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::UnsupportedCurve` for curves other than Ed25519.
    pub fn eddsa(&self) -> JwkResult<EdDsa> {
        if self.curve != OkpCurve::Ed25519 {
            return Err(JwkError::UnsupportedCurve(self.curve.name().to_string()));
        }
        let key = match self.private_key()? {
            Some(d) => {
                let d = to_array(&d, D)?;
                AsymmetricKey::Private(SigningKey::from_bytes(&d))
            }
            None => {
                let x = to_array(&self.public_key()?, X)?;
                let public = VerifyingKey::from_bytes(&x).map_err(|_| JwkError::InvalidKey)?;
                AsymmetricKey::Public(public)
            }
        };
        EdDsa::new(key)
    }

    /// Encrypts a key for this key's owner.
    ///
    /// # Errors
    ///
    /// Always fails with `JwkError::UnsupportedOperation`.
    pub fn encrypt_key(&self, _key: &[u8], _alg: Option<&str>) -> JwkResult<Vec<u8>> {
        Err(Self::unsupported("encrypt_key"))
    }

    /// Decrypts a key encrypted with [`encrypt_key`](Self::encrypt_key).
    ///
    /// # Errors
    ///
    /// Always fails with `JwkError::UnsupportedOperation`.
    pub fn decrypt_key(&self, _cipherkey: &[u8], _alg: Option<&str>) -> JwkResult<Vec<u8>> {
        Err(Self::unsupported("decrypt_key"))
    }

    fn unsupported(operation: &'static str) -> JwkError {
        debug!(operation, "unsupported OKP operation");
        JwkError::UnsupportedOperation {
            operation,
            target: Self::KTY,
        }
    }

    /// Checks key lengths and that `d` matches `x`.
    fn check_key_material(curve: OkpCurve, params: &JwkParams) -> JwkResult<()> {
        curve.require_engine()?;
        let x = to_array(&params.require_b64u(X)?, X)?;
        if curve == OkpCurve::Ed25519 && VerifyingKey::from_bytes(&x).is_err() {
            return Err(JwkError::InvalidParameter(X));
        }
        if let Some(d) = params.decode_b64u(D)? {
            let d = to_array(&d, D)?;
            let derived = curve.public_from_private(&d)?;
            if derived != *x {
                return Err(JwkError::InvalidParameter(D));
            }
        }
        Ok(())
    }
}

impl Jwk for OkpJwk {
    const KTY: &'static str = "OKP";

    const PARAMS: &'static [JwkParameter] = &[
        JwkParameter::new(CRV, "Curve", false, true, ParamKind::Name),
        JwkParameter::new(X, "Public Key", false, true, ParamKind::B64u),
        JwkParameter::new(D, "Private Key", true, false, ParamKind::B64u),
    ];

    const SIGNATURE_ALGORITHMS: Registry<SignatureAlgorithm> = Registry::empty();
    const ENCRYPTION_ALGORITHMS: Registry<EncryptionAlgorithm> = Registry::empty();
    const KEY_MANAGEMENT_ALGORITHMS: Registry<KeyManagementAlgorithm> = Registry::empty();

    fn from_params(params: JwkParams) -> JwkResult<Self> {
        params.validate(Self::KTY, Self::PARAMS)?;
        let curve: OkpCurve = params
            .get(CRV)
            .ok_or(JwkError::MissingParameter(CRV))?
            .parse()?;
        Self::check_key_material(curve, &params)?;
        Ok(Self { curve, params })
    }

    fn params(&self) -> &JwkParams {
        &self.params
    }

    fn public_jwk(&self) -> JwkResult<Self> {
        let mut params = self.params.clone();
        params.remove(D);
        Ok(Self {
            curve: self.curve,
            params,
        })
    }

    fn sign(&self, _data: &[u8], _alg: Option<&str>) -> JwkResult<Vec<u8>> {
        Err(Self::unsupported("sign"))
    }

    fn verify(
        &self,
        _data: &[u8],
        _signature: &[u8],
        _alg: Option<&str>,
        _algs: Option<&[&str]>,
    ) -> JwkResult<bool> {
        Err(Self::unsupported("verify"))
    }

    fn encrypt(
        &self,
        _plaintext: &[u8],
        _aad: Option<&[u8]>,
        _alg: Option<&str>,
        _iv: Option<&[u8]>,
    ) -> JwkResult<EncryptOutput> {
        Err(Self::unsupported("encrypt"))
    }

    fn decrypt(
        &self,
        _ciphertext: &[u8],
        _tag: &[u8],
        _iv: &[u8],
        _aad: Option<&[u8]>,
        _alg: Option<&str>,
    ) -> JwkResult<Vec<u8>> {
        Err(Self::unsupported("decrypt"))
    }
}

// =============================================================================
// PartialEq (constant-time comparison of the private part)
// =============================================================================

impl PartialEq for OkpJwk {
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve || self.params.get(X) != other.params.get(X) {
            return false;
        }
        match (self.params.get(D), other.params.get(D)) {
            (Some(a), Some(b)) => a.as_bytes().ct_eq(b.as_bytes()).into(),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for OkpJwk {}

// =============================================================================
// Debug (security: don't expose key material)
// =============================================================================

impl Debug for OkpJwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_params("OkpJwk", self, f)
    }
}
