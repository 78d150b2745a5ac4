//! Algorithm selection against a key's registries.
//!
//! A key may declare an algorithm (its `alg` parameter) and the caller may
//! request one. The two never silently override each other: if both are
//! present they must agree.

use tracing::debug;

use crate::core::error::{JwkError, JwkResult};
use crate::core::registry::{Registry, RegistryEntry};

/// Selects the single algorithm to use for an operation.
///
/// The explicitly requested `alg` wins when the key declares none; the
/// key-declared `key_alg` is used when none is requested.
///
/// # Errors
///
/// - `JwkError::AlgorithmConflict` if both are present and differ
/// - `JwkError::UnsupportedAlgorithm` if the chosen name is not in `registry`
/// - `JwkError::AlgorithmRequired` if neither is present
pub fn select_alg<E: RegistryEntry + 'static>(
    key_alg: Option<&str>,
    alg: Option<&str>,
    registry: &Registry<E>,
) -> JwkResult<&'static E> {
    let name = match (key_alg, alg) {
        (Some(declared), Some(requested)) if declared != requested => {
            return Err(JwkError::AlgorithmConflict {
                requested: requested.to_string(),
                declared: declared.to_string(),
            });
        }
        (_, Some(name)) | (Some(name), None) => name,
        (None, None) => return Err(JwkError::AlgorithmRequired),
    };
    let entry = registry.require(name)?;
    debug!(alg = entry.name(), "selected algorithm");
    Ok(entry)
}

/// Selects the candidate algorithms for an operation that may try several,
/// such as signature verification.
///
/// When an algorithm is requested or declared, the result is the single
/// [`select_alg`] choice, which must also appear in `algs` if an allow-list
/// is given. Otherwise every name of `algs` known to `registry` is returned,
/// in allow-list order; unknown names are skipped.
///
/// # Errors
///
/// - the errors of [`select_alg`]
/// - `JwkError::UnsupportedAlgorithm` if the allow-list excludes the chosen
///   algorithm or leaves no candidate
/// - `JwkError::AlgorithmRequired` if no algorithm and no allow-list is given
pub fn select_algs<E: RegistryEntry + 'static>(
    key_alg: Option<&str>,
    alg: Option<&str>,
    algs: Option<&[&str]>,
    registry: &Registry<E>,
) -> JwkResult<Vec<&'static E>> {
    if key_alg.is_some() || alg.is_some() {
        let entry = select_alg(key_alg, alg, registry)?;
        if let Some(allowed) = algs {
            if !allowed.contains(&entry.name()) {
                return Err(JwkError::UnsupportedAlgorithm(entry.name().to_string()));
            }
        }
        return Ok(vec![entry]);
    }

    let Some(allowed) = algs else {
        return Err(JwkError::AlgorithmRequired);
    };
    let candidates: Vec<&'static E> = allowed
        .iter()
        .filter_map(|name| registry.get(name))
        .collect();
    if candidates.is_empty() {
        return Err(JwkError::UnsupportedAlgorithm(allowed.join(",")));
    }
    debug!(count = candidates.len(), "selected candidate algorithms");
    Ok(candidates)
}
