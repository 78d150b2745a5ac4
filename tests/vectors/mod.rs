//! Test vector types for the JWK/JWA integration tests.
//!
//! Each JSON file in this directory holds one suite. Byte strings are hex
//! encoded; JWK parameter values are base64url, as in a JWK.

// Not every suite uses every field
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Test vector for an HMAC signature algorithm.
#[derive(Debug, Deserialize)]
pub struct HmacTestVector {
    pub name: String,
    pub alg: String,
    /// Hex-encoded key bytes
    pub key: String,
    /// Hex-encoded message
    pub data: String,
    /// Hex-encoded MAC
    pub signature: String,
}

/// Test vector for an authenticated encryption algorithm.
#[derive(Debug, Deserialize)]
pub struct AeadTestVector {
    pub name: String,
    pub alg: String,
    pub key: String,
    pub iv: String,
    pub plaintext: String,
    pub aad: String,
    pub ciphertext: String,
    pub tag: String,
}

/// Test vector for AES key wrap.
#[derive(Debug, Deserialize)]
pub struct KeyWrapTestVector {
    pub name: String,
    pub alg: String,
    /// Hex-encoded key encryption key
    pub kek: String,
    /// Hex-encoded key to wrap
    pub key: String,
    /// Hex-encoded wrapped key
    pub wrapped: String,
}

/// Test vector for Ed25519 signatures.
#[derive(Debug, Deserialize)]
pub struct Ed25519TestVector {
    pub name: String,
    /// Hex-encoded private key
    pub d: String,
    /// Hex-encoded public key
    pub x: String,
    pub message: String,
    pub signature: String,
}

/// Test vector for RFC 7638 thumbprints.
#[derive(Debug, Deserialize)]
pub struct ThumbprintTestVector {
    pub name: String,
    pub kty: String,
    /// JWK parameters other than `kty`
    pub params: BTreeMap<String, String>,
    pub thumbprint: String,
}

/// Get the path to the test vectors directory.
fn vectors_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/vectors")
}

/// Load a suite from `tests/vectors/<file>`.
pub fn load_vectors<T: DeserializeOwned>(file: &str) -> TestVectorSuite<T> {
    let path = vectors_dir().join(file);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

/// Decode a hex string from a vector.
pub fn hex_decode(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|err| panic!("invalid hex {s:?}: {err}"))
}
