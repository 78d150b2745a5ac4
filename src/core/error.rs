//! Error types for JWK operations.
//!
//! This module provides a unified error type for key construction, algorithm
//! selection and cryptographic operations. Errors raised while validating
//! keys and algorithms are descriptive; errors raised by the cryptographic
//! engine itself are intentionally vague to avoid leaking information that
//! could aid attacks.

use thiserror::Error;

/// Errors that can occur when working with JSON Web Keys.
#[derive(Debug, Error)]
pub enum JwkError {
    /// The key length does not match the exact size the algorithm requires.
    #[error("Key size of {actual} bits does not match the {expected} bits expected by {alg}")]
    KeySizeMismatch {
        /// The algorithm that rejected the key.
        alg: &'static str,
        /// The expected key size in bits.
        expected: usize,
        /// The provided key size in bits.
        actual: usize,
    },

    /// The key is shorter than the minimum the algorithm allows.
    #[error("Key size of {actual} bits is below the {minimum} bits required by {alg}")]
    KeyTooShort {
        /// The algorithm that rejected the key.
        alg: &'static str,
        /// The minimum key size in bits.
        minimum: usize,
        /// The provided key size in bits.
        actual: usize,
    },

    /// The key material is invalid for reasons other than its size.
    #[error("Invalid key material")]
    InvalidKey,

    /// The algorithm is not registered for this key type.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// No algorithm was requested and the key does not declare one.
    #[error("An algorithm is required but none was specified")]
    AlgorithmRequired,

    /// The requested algorithm differs from the one declared by the key.
    #[error("Requested algorithm {requested} conflicts with key algorithm {declared}")]
    AlgorithmConflict {
        /// The explicitly requested algorithm.
        requested: String,
        /// The algorithm declared by the key.
        declared: String,
    },

    /// The operation needs a private key but a public key is held.
    #[error("This operation requires a private key")]
    PrivateKeyRequired,

    /// The operation needs a public key but a private key is held.
    #[error("This operation requires a public key")]
    PublicKeyRequired,

    /// The operation is not implemented for this key type or algorithm.
    #[error("Operation {operation} is not supported for {target}")]
    UnsupportedOperation {
        /// The operation name.
        operation: &'static str,
        /// The key type, or the algorithm that refused the operation.
        target: &'static str,
    },

    /// Authentication tag or integrity check verification failed.
    /// Intentionally vague for security.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// A required parameter is missing from the key.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter value is malformed.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The parameter mapping declares a different key type.
    #[error("Key type {found} does not match the expected {expected}")]
    KtyMismatch {
        /// The key type of the target JWK type.
        expected: &'static str,
        /// The key type found in the parameters.
        found: String,
    },

    /// The curve is unknown or has no available engine.
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// The initialization vector has the wrong length.
    #[error("Invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIv {
        /// The IV size in bytes the algorithm requires.
        expected: usize,
        /// The provided IV size in bytes.
        actual: usize,
    },

    /// Base64url decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Generic cryptographic error.
    /// Intentionally vague for security.
    #[error("Cryptographic operation failed")]
    CryptoError,
}

impl JwkError {
    /// Returns `true` for errors saying the key is unsuitable for an algorithm.
    #[must_use]
    pub const fn is_key_suitability(&self) -> bool {
        matches!(
            self,
            Self::KeySizeMismatch { .. } | Self::KeyTooShort { .. } | Self::InvalidKey
        )
    }
}

/// Result type alias for JWK operations.
pub type JwkResult<T> = Result<T, JwkError>;
