//! Integration tests using published test vectors.
//!
//! HMAC vectors come from RFC 4231, AES-CBC-HMAC from RFC 7518 appendix B,
//! AES key wrap from RFC 3394 and Ed25519 from RFC 8032. Thumbprints follow
//! RFC 7638 and RFC 8037.

// Test code legitimately uses panic patterns for test failure reporting
#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

mod vectors;

use jwkit::{Jwk, JwkParams, SymmetricJwk};
use vectors::*;

fn oct_key(hex: &str) -> SymmetricJwk {
    SymmetricJwk::from_bytes(&hex_decode(hex), JwkParams::new()).expect("valid oct key")
}

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn test_hmac_vectors() {
    let suite: TestVectorSuite<HmacTestVector> = load_vectors("hmac.json");
    assert!(!suite.tests.is_empty(), "{} has no tests", suite.name);

    for test in suite.tests {
        let jwk = oct_key(&test.key);
        let data = hex_decode(&test.data);
        let expected = hex_decode(&test.signature);

        let signature = jwk
            .sign(&data, Some(test.alg.as_str()))
            .unwrap_or_else(|err| panic!("{}: sign failed: {err}", test.name));
        assert_eq!(signature, expected, "Test '{}' signature mismatch", test.name);

        let valid = jwk
            .verify(&data, &expected, Some(test.alg.as_str()), None)
            .unwrap_or_else(|err| panic!("{}: verify failed: {err}", test.name));
        assert!(valid, "Test '{}' should verify", test.name);

        // One flipped bit must not verify
        let mut tampered = expected.clone();
        tampered[0] ^= 0x01;
        let valid = jwk
            .verify(&data, &tampered, Some(test.alg.as_str()), None)
            .expect("verify runs");
        assert!(!valid, "Test '{}' tampered signature verified", test.name);
    }
}

#[test]
fn test_hmac_vectors_allow_list() {
    let suite: TestVectorSuite<HmacTestVector> = load_vectors("hmac.json");
    let allowed = ["HS256", "HS384", "HS512"];

    for test in suite.tests {
        let jwk = oct_key(&test.key);
        let valid = jwk
            .verify(
                &hex_decode(&test.data),
                &hex_decode(&test.signature),
                None,
                Some(&allowed[..]),
            )
            .expect("verify runs");
        assert!(valid, "Test '{}' should verify against the allow-list", test.name);
    }
}

// =============================================================================
// Authenticated encryption
// =============================================================================

fn check_aead_suite(file: &str) {
    let suite: TestVectorSuite<AeadTestVector> = load_vectors(file);
    assert!(!suite.tests.is_empty(), "{} has no tests", suite.name);

    for test in suite.tests {
        let jwk = oct_key(&test.key);
        let iv = hex_decode(&test.iv);
        let aad = hex_decode(&test.aad);
        let plaintext = hex_decode(&test.plaintext);
        let ciphertext = hex_decode(&test.ciphertext);
        let tag = hex_decode(&test.tag);

        let output = jwk
            .encrypt(&plaintext, Some(aad.as_slice()), Some(test.alg.as_str()), Some(iv.as_slice()))
            .unwrap_or_else(|err| panic!("{}: encrypt failed: {err}", test.name));
        assert_eq!(output.ciphertext, ciphertext, "Test '{}' ciphertext", test.name);
        assert_eq!(output.tag, tag, "Test '{}' tag", test.name);
        assert_eq!(output.iv, iv, "Test '{}' iv", test.name);

        let decrypted = jwk
            .decrypt(&ciphertext, &tag, &iv, Some(aad.as_slice()), Some(test.alg.as_str()))
            .unwrap_or_else(|err| panic!("{}: decrypt failed: {err}", test.name));
        assert_eq!(decrypted, plaintext, "Test '{}' plaintext", test.name);

        let mut bad_tag = tag.clone();
        bad_tag[0] ^= 0x80;
        let result = jwk.decrypt(&ciphertext, &bad_tag, &iv, Some(aad.as_slice()), Some(test.alg.as_str()));
        assert!(result.is_err(), "Test '{}' accepted a bad tag", test.name);

        let result = jwk.decrypt(&ciphertext, &tag, &iv, Some(&b"other"[..]), Some(test.alg.as_str()));
        assert!(result.is_err(), "Test '{}' accepted other aad", test.name);
    }
}

#[test]
fn test_aes_cbc_hmac_vectors() {
    check_aead_suite("aes_cbc_hmac.json");
}

#[test]
fn test_aes_gcm_vectors() {
    check_aead_suite("aes_gcm.json");
}

// =============================================================================
// Key wrapping
// =============================================================================

#[test]
fn test_aes_kw_vectors() {
    let suite: TestVectorSuite<KeyWrapTestVector> = load_vectors("aes_kw.json");
    assert!(!suite.tests.is_empty(), "{} has no tests", suite.name);

    for test in suite.tests {
        let kek = oct_key(&test.kek);
        let key = hex_decode(&test.key);
        let wrapped = hex_decode(&test.wrapped);

        let result = kek
            .wrap_key(&key, Some(test.alg.as_str()))
            .unwrap_or_else(|err| panic!("{}: wrap failed: {err}", test.name));
        assert_eq!(result, wrapped, "Test '{}' wrapped key", test.name);

        let unwrapped = kek
            .unwrap_key(&wrapped, Some(test.alg.as_str()))
            .unwrap_or_else(|err| panic!("{}: unwrap failed: {err}", test.name));
        assert_eq!(*unwrapped.key().expect("key"), key, "Test '{}' key", test.name);

        let mut corrupted = wrapped.clone();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0x01;
        assert!(
            kek.unwrap_key(&corrupted, Some(test.alg.as_str())).is_err(),
            "Test '{}' unwrapped a corrupted key",
            test.name
        );
    }
}

// =============================================================================
// Thumbprints
// =============================================================================

fn params_of(test: &ThumbprintTestVector) -> JwkParams {
    let mut params: JwkParams = test
        .params
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    params.insert("kty", test.kty.clone());
    params
}

#[test]
fn test_thumbprint_vectors() {
    let suite: TestVectorSuite<ThumbprintTestVector> = load_vectors("thumbprint.json");

    for test in &suite.tests {
        let thumbprint = match test.kty.as_str() {
            "oct" => SymmetricJwk::from_params(params_of(test))
                .expect("valid oct key")
                .thumbprint(),
            #[cfg(feature = "okp")]
            "OKP" => jwkit::OkpJwk::from_params(params_of(test))
                .expect("valid OKP key")
                .thumbprint(),
            #[cfg(not(feature = "okp"))]
            "OKP" => continue,
            other => panic!("Test '{}' has unknown kty {other}", test.name),
        };
        assert_eq!(thumbprint, test.thumbprint, "Test '{}' thumbprint", test.name);
    }
}

// =============================================================================
// Ed25519
// =============================================================================

#[cfg(feature = "okp")]
mod ed25519_tests {
    use super::*;
    use jwkit::core::jwa::SignatureAlg;
    use jwkit::{OkpCurve, OkpJwk};

    #[test]
    fn test_ed25519_vectors() {
        let suite: TestVectorSuite<Ed25519TestVector> = load_vectors("ed25519.json");
        assert!(!suite.tests.is_empty(), "{} has no tests", suite.name);

        for test in suite.tests {
            let x = hex_decode(&test.x);
            let d = hex_decode(&test.d);
            let message = hex_decode(&test.message);
            let expected = hex_decode(&test.signature);

            let jwk = OkpJwk::private(OkpCurve::Ed25519, &x, &d, JwkParams::new())
                .unwrap_or_else(|err| panic!("{}: invalid key: {err}", test.name));
            let signature = jwk
                .eddsa()
                .and_then(|alg| alg.sign(&message))
                .unwrap_or_else(|err| panic!("{}: sign failed: {err}", test.name));
            assert_eq!(signature, expected, "Test '{}' signature", test.name);

            let public = jwk.public_jwk().expect("public part");
            assert!(!public.is_private());
            let verifier = public.eddsa().expect("EdDSA verifier");
            assert!(
                verifier.verify(&message, &expected).expect("verify runs"),
                "Test '{}' should verify",
                test.name
            );

            let mut tampered = message.clone();
            tampered.push(0x00);
            assert!(
                !verifier.verify(&tampered, &expected).expect("verify runs"),
                "Test '{}' verified another message",
                test.name
            );
        }
    }

    #[test]
    fn test_ed25519_public_key_derivation() {
        let suite: TestVectorSuite<Ed25519TestVector> = load_vectors("ed25519.json");

        for test in suite.tests {
            let x = hex_decode(&test.x);
            let d = hex_decode(&test.d);
            let jwk = OkpJwk::private(OkpCurve::Ed25519, &x, &d, JwkParams::new())
                .expect("valid key");
            assert_eq!(jwk.public_key().expect("x"), x, "Test '{}' x", test.name);

            // d from one vector with x from another is rejected
            let mut wrong_x = x.clone();
            wrong_x[0] ^= 0x01;
            assert!(
                OkpJwk::private(OkpCurve::Ed25519, &wrong_x, &d, JwkParams::new()).is_err(),
                "Test '{}' accepted a mismatched public key",
                test.name
            );
        }
    }
}
