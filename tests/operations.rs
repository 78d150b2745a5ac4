//! End-to-end key scenarios through the public API.

#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

use jwkit::core::jwa::{A128Gcm, A256Gcm, SymmetricAlg};
use jwkit::{Jwk, JwkError, JwkParams, JwkResult, SymmetricJwk};

fn oct(key: &[u8]) -> JwkResult<SymmetricJwk> {
    SymmetricJwk::from_bytes(key, JwkParams::new())
}

// =============================================================================
// Key construction
// =============================================================================

#[test]
fn test_required_parameters_per_kty() -> JwkResult<()> {
    let missing: JwkParams = [("kty", "oct")].into_iter().collect();
    assert!(matches!(
        SymmetricJwk::from_params(missing),
        Err(JwkError::MissingParameter("k"))
    ));

    let no_kty: JwkParams = [("k", "AAECAwQFBgcICQoLDA0ODw")].into_iter().collect();
    assert!(matches!(
        SymmetricJwk::from_params(no_kty),
        Err(JwkError::MissingParameter("kty"))
    ));

    let bad_encoding: JwkParams = [("kty", "oct"), ("k", "AAEC+/==")].into_iter().collect();
    assert!(SymmetricJwk::from_params(bad_encoding).is_err());

    let complete: JwkParams = [("kty", "oct"), ("k", "AAECAwQFBgcICQoLDA0ODw")]
        .into_iter()
        .collect();
    let jwk = SymmetricJwk::from_params(complete)?;
    assert_eq!(jwk.key_size(), 128);
    Ok(())
}

#[test]
fn test_generate_for_alg_records_alg() -> JwkResult<()> {
    for alg in ["HS256", "HS384", "HS512"] {
        let jwk = SymmetricJwk::generate_for_alg(alg, JwkParams::new().with("kid", "k1"))?;
        assert_eq!(jwk.alg(), Some(alg));
        assert_eq!(jwk.kid(), Some("k1"));
        let signature = jwk.sign(b"payload", None)?;
        assert!(jwk.verify(b"payload", &signature, None, None)?);
    }
    for (alg, bits) in [("A128GCM", 128), ("A256CBC-HS512", 512)] {
        let jwk = SymmetricJwk::generate_for_alg(alg, JwkParams::new())?;
        assert_eq!(jwk.key_size(), bits);
    }
    Ok(())
}

#[test]
fn test_generated_keys_differ() -> JwkResult<()> {
    let a = SymmetricJwk::generate(256, JwkParams::new())?;
    let b = SymmetricJwk::generate(256, JwkParams::new())?;
    assert_ne!(a, b);
    assert_ne!(a.thumbprint(), b.thumbprint());
    Ok(())
}

#[test]
fn test_debug_redacts_key() -> JwkResult<()> {
    let jwk = oct(&[0u8; 16])?;
    let debug = format!("{jwk:?}");
    assert!(!debug.contains("AAAAAAAAAAAAAAAAAAAAAA"));
    assert!(debug.contains("REDACTED"));
    Ok(())
}

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn test_sign_verify_all_algorithms() -> JwkResult<()> {
    let jwk = oct(&[0x42; 64])?;
    for alg in ["HS256", "HS384", "HS512"] {
        let signature = jwk.sign(b"data", Some(alg))?;
        assert!(jwk.verify(b"data", &signature, Some(alg), None)?, "{alg}");

        assert!(!jwk.verify(b"datb", &signature, Some(alg), None)?, "{alg}");

        let mut flipped = signature.clone();
        let last = flipped.len() - 1;
        flipped[last] ^= 0x01;
        assert!(!jwk.verify(b"data", &flipped, Some(alg), None)?, "{alg}");

        assert!(!jwk.verify(b"data", &signature[..8], Some(alg), None)?, "{alg}");
    }
    Ok(())
}

#[test]
fn test_algorithm_conflict() -> JwkResult<()> {
    let jwk = SymmetricJwk::from_bytes(&[1u8; 64], JwkParams::new().with("alg", "HS256"))?;
    assert!(matches!(
        jwk.sign(b"data", Some("HS512")),
        Err(JwkError::AlgorithmConflict { .. })
    ));
    let signature = jwk.sign(b"data", Some("HS256"))?;
    assert_eq!(signature, jwk.sign(b"data", None)?);
    Ok(())
}

#[test]
fn test_algorithm_required() -> JwkResult<()> {
    let jwk = oct(&[1u8; 32])?;
    assert!(matches!(jwk.sign(b"data", None), Err(JwkError::AlgorithmRequired)));
    assert!(matches!(
        jwk.encrypt(b"data", None, None, None),
        Err(JwkError::AlgorithmRequired)
    ));
    assert!(matches!(
        jwk.wrap_key(&[0u8; 16], None),
        Err(JwkError::AlgorithmRequired)
    ));
    assert!(matches!(
        jwk.sign(b"data", Some("RS256")),
        Err(JwkError::UnsupportedAlgorithm(_))
    ));
    Ok(())
}

#[test]
fn test_verify_allow_list() -> JwkResult<()> {
    let jwk = oct(&[3u8; 48])?;
    let signature = jwk.sign(b"data", Some("HS384"))?;

    let allowed = ["HS256", "HS384"];
    assert!(jwk.verify(b"data", &signature, None, Some(&allowed[..]))?);

    // HS512 needs a longer key and is skipped
    let allowed = ["HS256", "HS512"];
    assert!(!jwk.verify(b"data", &signature, None, Some(&allowed[..]))?);

    let allowed = ["HS256"];
    assert!(!jwk.verify(b"data", &signature, None, Some(&allowed[..]))?);
    Ok(())
}

#[test]
fn test_verify_allow_list_skips_unsuitable_algorithms() -> JwkResult<()> {
    let jwk = oct(&[7u8; 32])?;
    let signature = jwk.sign(b"data", Some("HS256"))?;
    let allowed = ["HS256", "HS384", "HS512"];
    assert!(jwk.verify(b"data", &signature, None, Some(&allowed[..]))?);

    let mut tampered = signature.clone();
    tampered[0] ^= 0x01;
    let allowed = ["HS256", "HS512"];
    assert!(!jwk.verify(b"data", &tampered, None, Some(&allowed[..]))?);

    let allowed = ["HS512", "HS256"];
    assert!(jwk.verify(b"data", &signature, None, Some(&allowed[..]))?);
    Ok(())
}

#[test]
fn test_verify_allow_list_key_unsuitable_for_all() -> JwkResult<()> {
    let jwk = oct(&[7u8; 16])?;
    let allowed = ["HS256", "HS384", "HS512"];
    assert!(matches!(
        jwk.verify(b"data", &[0u8; 32], None, Some(&allowed[..])),
        Err(JwkError::KeyTooShort { alg: "HS256", .. })
    ));

    // An explicit algorithm still reports the unsuitable key
    let jwk = oct(&[7u8; 48])?;
    assert!(matches!(
        jwk.verify(b"data", &[0u8; 64], Some("HS512"), None),
        Err(JwkError::KeyTooShort { alg: "HS512", .. })
    ));
    Ok(())
}

#[test]
fn test_hmac_key_too_short() -> JwkResult<()> {
    let jwk = oct(&[1u8; 16])?;
    assert!(matches!(
        jwk.sign(b"data", Some("HS256")),
        Err(JwkError::KeyTooShort { minimum: 256, actual: 128, .. })
    ));
    Ok(())
}

// =============================================================================
// Authenticated encryption
// =============================================================================

#[test]
fn test_a256gcm_scenario() -> JwkResult<()> {
    let jwk = SymmetricJwk::generate(256, JwkParams::new())?;
    let output = jwk.encrypt(b"hello", Some(&b"context"[..]), Some("A256GCM"), None)?;
    assert_eq!(output.tag.len(), 16);
    assert_eq!(output.iv.len(), 12);
    assert_eq!(output.ciphertext.len(), 5);

    let plaintext = jwk.decrypt(
        &output.ciphertext,
        &output.tag,
        &output.iv,
        Some(&b"context"[..]),
        Some("A256GCM"),
    )?;
    assert_eq!(plaintext, b"hello");

    let mut tag = output.tag.clone();
    tag[3] ^= 0xff;
    assert!(matches!(
        jwk.decrypt(
            &output.ciphertext,
            &tag,
            &output.iv,
            Some(&b"context"[..]),
            Some("A256GCM")
        ),
        Err(JwkError::AuthenticationFailed)
    ));
    Ok(())
}

#[test]
fn test_aes_key_length_gate() {
    let key = [0u8; 16];
    assert!(matches!(
        A256Gcm::check_key(&key),
        Err(JwkError::KeySizeMismatch { expected: 256, actual: 128, .. })
    ));
    assert!(A128Gcm::check_key(&key).is_ok());
    assert!(!A256Gcm::supports_key(&key));
    assert!(A128Gcm::supports_key(&key));
}

#[test]
fn test_aead_round_trip_all_algorithms() -> JwkResult<()> {
    let cases = [
        ("A128GCM", 16),
        ("A192GCM", 24),
        ("A256GCM", 32),
        ("A128CBC-HS256", 32),
        ("A192CBC-HS384", 48),
        ("A256CBC-HS512", 64),
    ];
    for (alg, len) in cases {
        let jwk = oct(&vec![0x5a; len])?;
        assert!(jwk.supported_encryption_algorithms().contains(&alg));
        let plaintexts: [&[u8]; 4] = [
            b"",
            b"x",
            b"exactly 16 bytes",
            b"a longer plaintext spanning blocks",
        ];
        for plaintext in plaintexts {
            let output = jwk.encrypt(plaintext, None, Some(alg), None)?;
            let decrypted =
                jwk.decrypt(&output.ciphertext, &output.tag, &output.iv, None, Some(alg))?;
            assert_eq!(decrypted, plaintext, "{alg}");
        }

        let wrong = oct(&vec![0x5a; len + 8])?;
        assert!(matches!(
            wrong.decrypt(b"", &[0u8; 16], &[0u8; 16], None, Some(alg)),
            Err(JwkError::KeySizeMismatch { .. })
        ));
    }
    Ok(())
}

// =============================================================================
// Key wrapping
// =============================================================================

#[test]
fn test_wrap_unwrap_all_algorithms() -> JwkResult<()> {
    for (alg, len) in [("A128KW", 16), ("A192KW", 24), ("A256KW", 32)] {
        let kek = oct(&vec![0x11; len])?;
        for cek_len in [16, 24, 32, 64] {
            let cek = SymmetricJwk::generate(cek_len * 8, JwkParams::new())?;
            let wrapped = kek.wrap_key(&cek.key()?, Some(alg))?;
            assert_eq!(wrapped.len(), cek_len + 8);
            let unwrapped = kek.unwrap_key(&wrapped, Some(alg))?;
            assert_eq!(unwrapped, cek, "{alg} {cek_len}");
        }
    }
    Ok(())
}

#[test]
fn test_wrap_requires_key_wrap_capability() -> JwkResult<()> {
    let kek = oct(&[0x11; 16])?;
    for alg in ["dir", "A128GCMKW"] {
        assert!(matches!(
            kek.wrap_key(&[0u8; 16], Some(alg)),
            Err(JwkError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            kek.unwrap_key(&[0u8; 24], Some(alg)),
            Err(JwkError::UnsupportedOperation { target, .. }) if target == alg
        ));
    }

    let err = kek.wrap_key(&[0u8; 16], Some("dir")).unwrap_err();
    assert_eq!(err.to_string(), "Operation wrap_key is not supported for dir");
    Ok(())
}

#[test]
fn test_unwrap_with_wrong_kek() -> JwkResult<()> {
    let kek = oct(&[0x11; 32])?;
    let other = oct(&[0x12; 32])?;
    let wrapped = kek.wrap_key(&[0x33; 32], Some("A256KW"))?;
    assert!(matches!(
        other.unwrap_key(&wrapped, Some("A256KW")),
        Err(JwkError::AuthenticationFailed)
    ));
    Ok(())
}

#[test]
fn test_supported_algorithms_by_key_size() -> JwkResult<()> {
    let jwk = oct(&[0u8; 32])?;
    assert_eq!(jwk.supported_signature_algorithms(), vec!["HS256"]);
    assert_eq!(
        jwk.supported_encryption_algorithms(),
        vec!["A128CBC-HS256", "A256GCM"]
    );
    assert_eq!(
        jwk.supported_key_management_algorithms(),
        vec!["A256KW", "A256GCMKW", "dir"]
    );
    Ok(())
}

// =============================================================================
// OKP
// =============================================================================

#[cfg(feature = "okp")]
mod okp {
    use super::*;
    use jwkit::core::jwa::SignatureAlg;
    use jwkit::{OkpCurve, OkpJwk};

    #[test]
    fn test_generated_ed25519_signs() -> JwkResult<()> {
        let jwk = OkpJwk::generate(OkpCurve::Ed25519, JwkParams::new())?;
        assert!(jwk.is_private());
        let signature = jwk.eddsa()?.sign(b"message")?;
        assert_eq!(signature.len(), 64);

        let public = jwk.public_jwk()?;
        assert!(!public.is_private());
        assert_eq!(public.thumbprint(), jwk.thumbprint());
        assert!(public.eddsa()?.verify(b"message", &signature)?);
        assert!(!public.eddsa()?.verify(b"massage", &signature)?);

        assert!(matches!(
            public.eddsa()?.sign(b"message"),
            Err(JwkError::PrivateKeyRequired)
        ));
        Ok(())
    }

    #[test]
    fn test_okp_placeholders() -> JwkResult<()> {
        let jwk = OkpJwk::generate(OkpCurve::X25519, JwkParams::new())?;
        assert!(matches!(jwk.sign(b"m", None), Err(JwkError::UnsupportedOperation { .. })));
        assert!(matches!(
            jwk.encrypt_key(&[0u8; 16], None),
            Err(JwkError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            jwk.decrypt_key(&[0u8; 16], None),
            Err(JwkError::UnsupportedOperation { .. })
        ));
        assert!(matches!(jwk.eddsa(), Err(JwkError::UnsupportedCurve(_))));
        Ok(())
    }

    #[test]
    fn test_okp_from_params() -> JwkResult<()> {
        let params: JwkParams = [
            ("kty", "OKP"),
            ("crv", "Ed25519"),
            ("x", "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"),
        ]
        .into_iter()
        .collect();
        let jwk = OkpJwk::from_params(params)?;
        assert_eq!(jwk.curve(), OkpCurve::Ed25519);

        let missing_x: JwkParams = [("kty", "OKP"), ("crv", "Ed25519")].into_iter().collect();
        assert!(matches!(
            OkpJwk::from_params(missing_x),
            Err(JwkError::MissingParameter("x"))
        ));

        let ed448: JwkParams = [("kty", "OKP"), ("crv", "Ed448"), ("x", "AAAA")]
            .into_iter()
            .collect();
        assert!(OkpJwk::from_params(ed448).is_err());
        Ok(())
    }
}
