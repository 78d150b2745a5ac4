//! Secure random bytes for key and IV generation.

use rand_core::{OsRng, TryRngCore};
use zeroize::Zeroizing;

use crate::core::error::{JwkError, JwkResult};

/// Returns `len` bytes from the operating system RNG.
///
/// The buffer is zeroized on drop since it usually holds key material.
pub(crate) fn random_bytes(len: usize) -> JwkResult<Zeroizing<Vec<u8>>> {
    let mut bytes = Zeroizing::new(vec![0u8; len]);
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| JwkError::CryptoError)?;
    Ok(bytes)
}
