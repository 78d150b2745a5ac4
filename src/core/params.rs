//! JWK parameters and their schema.
//!
//! A JWK is a flat mapping of parameter names to string values. Each key
//! type declares the parameters it understands with [`JwkParameter`]; the
//! mapping is validated against that schema when a key is built.

use core::fmt::{self, Debug};
use std::collections::BTreeMap;

use base64::prelude::*;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::core::error::{JwkError, JwkResult};

/// Name of the key type parameter.
pub const KTY: &str = "kty";
/// Name of the algorithm parameter.
pub const ALG: &str = "alg";
/// Name of the key identifier parameter.
pub const KID: &str = "kid";
/// Name of the public key use parameter.
pub const USE: &str = "use";

/// How a parameter value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Unpadded base64url encoded bytes.
    B64u,
    /// A plain name, such as a curve identifier.
    Name,
}

impl ParamKind {
    /// Checks that `value` is well formed for this kind.
    fn check(self, name: &'static str, value: &str) -> JwkResult<()> {
        match self {
            Self::B64u => {
                let mut decoded = BASE64_URL_SAFE_NO_PAD
                    .decode(value)
                    .map_err(|_| JwkError::InvalidParameter(name))?;
                decoded.zeroize();
                Ok(())
            }
            Self::Name if value.is_empty() => Err(JwkError::InvalidParameter(name)),
            Self::Name => Ok(()),
        }
    }
}

/// Schema entry for one key type specific parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JwkParameter {
    /// The parameter name, as it appears in the JWK.
    pub name: &'static str,
    /// A human readable description.
    pub description: &'static str,
    /// Whether the value is private key material.
    pub is_private: bool,
    /// Whether the parameter must be present.
    pub is_required: bool,
    /// How the value is encoded.
    pub kind: ParamKind,
}

impl JwkParameter {
    /// Declares a parameter.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        is_private: bool,
        is_required: bool,
        kind: ParamKind,
    ) -> Self {
        Self {
            name,
            description,
            is_private,
            is_required,
            kind,
        }
    }
}

/// The parameter mapping of a JWK.
///
/// Values are zeroized when the mapping is dropped, since some of them hold
/// private key material. `Debug` shows parameter names only, and equality
/// compares values in constant time.
#[derive(Clone, Default)]
pub struct JwkParams(BTreeMap<String, String>);

impl JwkParams {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns `true` if the parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets a parameter, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Sets a parameter, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Removes a parameter, zeroizing its value.
    pub fn remove(&mut self, name: &str) {
        if let Some(mut value) = self.0.remove(name) {
            value.zeroize();
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Validates the mapping against the schema of key type `kty`.
    ///
    /// `kty` must be present and match; required parameters must be
    /// present; every value must be well formed for its kind.
    pub(crate) fn validate(&self, kty: &'static str, schema: &[JwkParameter]) -> JwkResult<()> {
        match self.get(KTY) {
            None => return Err(JwkError::MissingParameter(KTY)),
            Some(found) if found != kty => {
                return Err(JwkError::KtyMismatch {
                    expected: kty,
                    found: found.to_string(),
                })
            }
            Some(_) => {}
        }
        for param in schema {
            match self.get(param.name) {
                Some(value) => param.kind.check(param.name, value)?,
                None if param.is_required => return Err(JwkError::MissingParameter(param.name)),
                None => {}
            }
        }
        Ok(())
    }

    /// Decodes a base64url parameter into a zeroizing buffer.
    pub(crate) fn decode_b64u(&self, name: &'static str) -> JwkResult<Option<Zeroizing<Vec<u8>>>> {
        self.get(name)
            .map(|value| {
                BASE64_URL_SAFE_NO_PAD
                    .decode(value)
                    .map(Zeroizing::new)
                    .map_err(JwkError::Base64Decode)
            })
            .transpose()
    }

    /// Decodes a required base64url parameter.
    pub(crate) fn require_b64u(&self, name: &'static str) -> JwkResult<Zeroizing<Vec<u8>>> {
        self.decode_b64u(name)?
            .ok_or(JwkError::MissingParameter(name))
    }
}

impl<K, V> FromIterator<(K, V)> for JwkParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for JwkParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl Drop for JwkParams {
    fn drop(&mut self) {
        for value in self.0.values_mut() {
            value.zeroize();
        }
    }
}

impl PartialEq for JwkParams {
    fn eq(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let mut equal = Choice::from(1u8);
        for ((name, value), (other_name, other_value)) in self.0.iter().zip(&other.0) {
            // Parameter names are public
            if name != other_name {
                return false;
            }
            equal &= value.as_bytes().ct_eq(other_value.as_bytes());
        }
        equal.into()
    }
}

impl Eq for JwkParams {}

impl Debug for JwkParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Encodes bytes as unpadded base64url.
pub(crate) fn encode_b64u(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}
