//! Closed, name-keyed algorithm registries.
//!
//! Each key type declares one registry per capability. A registry is a
//! `const` table of descriptors, each built from a concrete algorithm type,
//! so dispatch by name never leaves the set of algorithms the key type
//! supports.

use crate::core::error::{JwkError, JwkResult};
use crate::core::jwa::{AesAlg, HmacAlg, KeyManagementAlg, KeyWrapAlg, SymmetricAlg};

/// Common view over registry descriptors.
pub trait RegistryEntry {
    /// The algorithm identifier.
    fn name(&self) -> &'static str;
}

/// A closed set of algorithm descriptors, looked up by name.
#[derive(Debug)]
pub struct Registry<E: 'static> {
    entries: &'static [E],
}

impl<E: 'static> Registry<E> {
    /// Creates a registry over a static table.
    #[must_use]
    pub const fn new(entries: &'static [E]) -> Self {
        Self { entries }
    }

    /// Creates an empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    /// Number of registered algorithms.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no algorithm is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static E> {
        self.entries.iter()
    }
}

impl<E: RegistryEntry + 'static> Registry<E> {
    /// Looks up a descriptor by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static E> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Looks up a descriptor by name, failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::UnsupportedAlgorithm` if `name` is not registered.
    pub fn require(&self, name: &str) -> JwkResult<&'static E> {
        self.get(name)
            .ok_or_else(|| JwkError::UnsupportedAlgorithm(name.to_string()))
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(RegistryEntry::name).collect()
    }
}

/// Descriptor of a signature algorithm keyed with raw bytes.
#[derive(Clone, Copy)]
pub struct SignatureAlgorithm {
    /// The algorithm identifier.
    pub name: &'static str,
    /// A human readable description.
    pub description: &'static str,
    /// Whether the algorithm may only process existing data.
    pub read_only: bool,
    /// The minimum key size in bits.
    pub min_key_size: usize,
    /// Non-failing key suitability predicate.
    pub supports_key: fn(&[u8]) -> bool,
    check_key: fn(&[u8]) -> JwkResult<()>,
    sign: fn(&[u8], &[u8]) -> JwkResult<Vec<u8>>,
    verify: fn(&[u8], &[u8], &[u8]) -> JwkResult<bool>,
}

fn hmac_sign<A: HmacAlg>(key: &[u8], data: &[u8]) -> JwkResult<Vec<u8>> {
    A::new(key)?.sign(data)
}

fn hmac_verify<A: HmacAlg>(key: &[u8], data: &[u8], signature: &[u8]) -> JwkResult<bool> {
    A::new(key)?.verify(data, signature)
}

impl SignatureAlgorithm {
    /// Builds the descriptor of an HMAC algorithm.
    #[must_use]
    pub const fn hmac<A: HmacAlg>() -> Self {
        Self {
            name: A::NAME,
            description: A::DESCRIPTION,
            read_only: A::READ_ONLY,
            min_key_size: A::MIN_KEY_SIZE,
            supports_key: A::supports_key,
            check_key: A::check_key,
            sign: hmac_sign::<A>,
            verify: hmac_verify::<A>,
        }
    }

    /// Checks that `key` is suitable for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns the key suitability error of the algorithm.
    pub fn check_key(&self, key: &[u8]) -> JwkResult<()> {
        (self.check_key)(key)
    }

    /// Signs `data` with `key`.
    ///
    /// # Errors
    ///
    /// Returns a key suitability error if `key` is unsuitable.
    pub fn sign(&self, key: &[u8], data: &[u8]) -> JwkResult<Vec<u8>> {
        (self.sign)(key, data)
    }

    /// Verifies `signature` over `data` with `key`.
    ///
    /// # Errors
    ///
    /// Returns a key suitability error if `key` is unsuitable.
    pub fn verify(&self, key: &[u8], data: &[u8], signature: &[u8]) -> JwkResult<bool> {
        (self.verify)(key, data, signature)
    }
}

impl RegistryEntry for SignatureAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }
}

impl core::fmt::Debug for SignatureAlgorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignatureAlgorithm")
            .field("name", &self.name)
            .field("min_key_size", &self.min_key_size)
            .finish_non_exhaustive()
    }
}

/// Descriptor of an AES based authenticated encryption algorithm.
#[derive(Clone, Copy)]
pub struct EncryptionAlgorithm {
    /// The algorithm identifier.
    pub name: &'static str,
    /// A human readable description.
    pub description: &'static str,
    /// Whether the algorithm may only process existing data.
    pub read_only: bool,
    /// Key size in bits.
    pub key_size: usize,
    /// Tag size in bytes.
    pub tag_size: usize,
    /// IV size in bytes.
    pub iv_size: usize,
    /// Non-failing key suitability predicate.
    pub supports_key: fn(&[u8]) -> bool,
    check_key: fn(&[u8]) -> JwkResult<()>,
    encrypt: fn(&[u8], &[u8], &[u8], Option<&[u8]>) -> JwkResult<Vec<u8>>,
    decrypt: fn(&[u8], &[u8], &[u8], Option<&[u8]>) -> JwkResult<Vec<u8>>,
}

fn aead_encrypt<A: AesAlg>(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: Option<&[u8]>,
) -> JwkResult<Vec<u8>> {
    A::new(key)?.encrypt(iv, plaintext, aad)
}

fn aead_decrypt<A: AesAlg>(
    key: &[u8],
    iv: &[u8],
    ciphertext_with_tag: &[u8],
    aad: Option<&[u8]>,
) -> JwkResult<Vec<u8>> {
    A::new(key)?.decrypt(iv, ciphertext_with_tag, aad)
}

impl EncryptionAlgorithm {
    /// Builds the descriptor of an AES algorithm.
    #[must_use]
    pub const fn of<A: AesAlg>() -> Self {
        Self {
            name: A::NAME,
            description: A::DESCRIPTION,
            read_only: A::READ_ONLY,
            key_size: A::KEY_SIZE,
            tag_size: A::TAG_SIZE,
            iv_size: A::IV_SIZE,
            supports_key: A::supports_key,
            check_key: A::check_key,
            encrypt: aead_encrypt::<A>,
            decrypt: aead_decrypt::<A>,
        }
    }

    /// Checks that `key` is suitable for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns the key suitability error of the algorithm.
    pub fn check_key(&self, key: &[u8]) -> JwkResult<()> {
        (self.check_key)(key)
    }

    /// Encrypts `plaintext`, returning the ciphertext followed by the tag.
    ///
    /// # Errors
    ///
    /// Returns a key suitability error or `JwkError::InvalidIv`.
    pub fn encrypt(
        &self,
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> JwkResult<Vec<u8>> {
        (self.encrypt)(key, iv, plaintext, aad)
    }

    /// Decrypts the ciphertext followed by the tag.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::AuthenticationFailed` if the tag does not verify.
    pub fn decrypt(
        &self,
        key: &[u8],
        iv: &[u8],
        ciphertext_with_tag: &[u8],
        aad: Option<&[u8]>,
    ) -> JwkResult<Vec<u8>> {
        (self.decrypt)(key, iv, ciphertext_with_tag, aad)
    }
}

impl RegistryEntry for EncryptionAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }
}

impl core::fmt::Debug for EncryptionAlgorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EncryptionAlgorithm")
            .field("name", &self.name)
            .field("key_size", &self.key_size)
            .field("tag_size", &self.tag_size)
            .field("iv_size", &self.iv_size)
            .finish_non_exhaustive()
    }
}

/// Wrap and unwrap entry points of a key wrapping algorithm.
#[derive(Clone, Copy)]
pub struct KeyWrapper {
    wrap: fn(&[u8], &[u8]) -> JwkResult<Vec<u8>>,
    unwrap: fn(&[u8], &[u8]) -> JwkResult<Vec<u8>>,
}

impl KeyWrapper {
    /// Wraps `plainkey` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a key suitability error or `JwkError::InvalidKey`.
    pub fn wrap(&self, key: &[u8], plainkey: &[u8]) -> JwkResult<Vec<u8>> {
        (self.wrap)(key, plainkey)
    }

    /// Unwraps `cipherkey` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `JwkError::AuthenticationFailed` if the integrity check fails.
    pub fn unwrap(&self, key: &[u8], cipherkey: &[u8]) -> JwkResult<Vec<u8>> {
        (self.unwrap)(key, cipherkey)
    }
}

/// Descriptor of a key management algorithm.
#[derive(Clone, Copy)]
pub struct KeyManagementAlgorithm {
    /// The algorithm identifier.
    pub name: &'static str,
    /// A human readable description.
    pub description: &'static str,
    /// Whether the algorithm may only process existing data.
    pub read_only: bool,
    /// Non-failing key suitability predicate.
    pub supports_key: fn(&[u8]) -> bool,
    check_key: fn(&[u8]) -> JwkResult<()>,
    wrapper: Option<KeyWrapper>,
}

fn key_wrap<A: KeyWrapAlg + SymmetricAlg>(key: &[u8], plainkey: &[u8]) -> JwkResult<Vec<u8>> {
    A::new(key)?.wrap_key(plainkey)
}

fn key_unwrap<A: KeyWrapAlg + SymmetricAlg>(key: &[u8], cipherkey: &[u8]) -> JwkResult<Vec<u8>> {
    A::new(key)?.unwrap_key(cipherkey)
}

impl KeyManagementAlgorithm {
    /// Builds the descriptor of a key wrapping algorithm.
    #[must_use]
    pub const fn key_wrap<A: KeyWrapAlg + SymmetricAlg>() -> Self {
        Self {
            name: A::NAME,
            description: A::DESCRIPTION,
            read_only: A::READ_ONLY,
            supports_key: A::supports_key,
            check_key: A::check_key,
            wrapper: Some(KeyWrapper {
                wrap: key_wrap::<A>,
                unwrap: key_unwrap::<A>,
            }),
        }
    }

    /// Builds the descriptor of a key management algorithm without the
    /// key wrap capability.
    #[must_use]
    pub const fn other<A: KeyManagementAlg + SymmetricAlg>() -> Self {
        Self {
            name: A::NAME,
            description: A::DESCRIPTION,
            read_only: A::READ_ONLY,
            supports_key: A::supports_key,
            check_key: A::check_key,
            wrapper: None,
        }
    }

    /// Checks that `key` is suitable for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns the key suitability error of the algorithm.
    pub fn check_key(&self, key: &[u8]) -> JwkResult<()> {
        (self.check_key)(key)
    }

    /// The key wrap entry points, if the algorithm wraps keys.
    #[must_use]
    pub const fn wrapper(&self) -> Option<&KeyWrapper> {
        self.wrapper.as_ref()
    }

    /// Returns `true` if the algorithm has the key wrap capability.
    #[must_use]
    pub const fn is_key_wrap(&self) -> bool {
        self.wrapper.is_some()
    }
}

impl RegistryEntry for KeyManagementAlgorithm {
    fn name(&self) -> &'static str {
        self.name
    }
}

impl core::fmt::Debug for KeyManagementAlgorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyManagementAlgorithm")
            .field("name", &self.name)
            .field("key_wrap", &self.is_key_wrap())
            .finish_non_exhaustive()
    }
}
